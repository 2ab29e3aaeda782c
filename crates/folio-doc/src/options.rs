#![forbid(unsafe_code)]

//! Layout options for the document renderer.

/// Layout options.
///
/// Built with chained setters:
///
/// ```
/// use folio_doc::RenderOptions;
///
/// let opts = RenderOptions::new().max_content_width(72).justify(false);
/// assert_eq!(opts.max_content_width, 72);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Widest text column, in cells.
    pub max_content_width: usize,
    /// Smallest margin kept on each side.
    pub min_margin: usize,
    /// Fully justify paragraphs.
    pub justify: bool,
    /// Width of form text fields, excluding brackets.
    pub input_width: usize,
    /// Prefix headings with section numbers.
    pub number_headings: bool,
    /// Bullet per list nesting depth, cycled.
    pub bullets: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_content_width: 80,
            min_margin: 2,
            justify: true,
            input_width: 20,
            number_headings: true,
            bullets: vec!["•".into(), "◦".into(), "▪".into()],
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_content_width(mut self, width: usize) -> Self {
        self.max_content_width = width;
        self
    }

    #[must_use]
    pub fn min_margin(mut self, margin: usize) -> Self {
        self.min_margin = margin;
        self
    }

    #[must_use]
    pub fn justify(mut self, justify: bool) -> Self {
        self.justify = justify;
        self
    }

    #[must_use]
    pub fn input_width(mut self, width: usize) -> Self {
        self.input_width = width;
        self
    }

    #[must_use]
    pub fn number_headings(mut self, number: bool) -> Self {
        self.number_headings = number;
        self
    }

    #[must_use]
    pub fn bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    /// `(margin, content_width)` for a canvas `width` cells wide.
    ///
    /// The content column is `min(max_content_width, width - 2 * min_margin)`
    /// and is centered, with any odd cell going to the right margin.
    pub fn geometry(&self, width: u16) -> (usize, usize) {
        let width = usize::from(width);
        let content = self
            .max_content_width
            .min(width.saturating_sub(self.min_margin * 2));
        ((width - content) / 2, content)
    }

    /// Bullet for a list at `depth` (0 for top level).
    pub fn bullet(&self, depth: usize) -> &str {
        if self.bullets.is_empty() {
            return "-";
        }
        &self.bullets[depth % self.bullets.len()]
    }
}

#![forbid(unsafe_code)]

//! Interactive element positions recorded during a render.
//!
//! Every `y` here is an absolute document row. Subtract the scroll
//! offset (see [`Link::screen_y`]) to get a canvas row.

/// A hyperlink as it appears on one rendered line.
///
/// A link wrapped across lines is recorded once per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub x: usize,
    pub y: usize,
    /// Display width of `text`.
    pub length: usize,
    pub is_image: bool,
}

impl Link {
    /// Canvas row at the given scroll offset, `None` when scrolled above.
    #[inline]
    pub fn screen_y(&self, scroll_y: usize) -> Option<usize> {
        self.y.checked_sub(scroll_y)
    }

    /// Whether the link lands inside a viewport of `height` rows.
    #[inline]
    pub fn is_visible(&self, scroll_y: usize, height: usize) -> bool {
        self.screen_y(scroll_y).is_some_and(|y| y < height)
    }
}

/// A form text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub value: String,
    pub input_type: String,
    /// Column of the first editable cell, just inside the `[`.
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub form_action: String,
    pub form_method: String,
}

impl Input {
    #[inline]
    pub fn screen_y(&self, scroll_y: usize) -> Option<usize> {
        self.y.checked_sub(scroll_y)
    }

    #[inline]
    pub fn is_visible(&self, scroll_y: usize, height: usize) -> bool {
        self.screen_y(scroll_y).is_some_and(|y| y < height)
    }
}

/// A rendered heading, for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    /// Section number such as `2.1`; `None` when unnumbered.
    pub number: Option<String>,
    pub text: String,
    /// Row of the first title line.
    pub y: usize,
}

/// Action and method of the innermost enclosing form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormContext {
    pub action: String,
    pub method: String,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico", "avif",
];

/// Whether `href` points at an image file, judged by extension.
pub fn is_image_href(href: &str) -> bool {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let Some((stem, ext)) = path.rsplit_once('.') else {
        return false;
    };
    !stem.is_empty()
        && !ext.contains('/')
        && IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
}

/// Last path segment of `href`, without query or fragment.
pub(crate) fn href_file_name(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(href)
}

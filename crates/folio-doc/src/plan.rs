#![forbid(unsafe_code)]

//! Line plans shared by the renderer and the height estimator.
//!
//! Each block kind is planned here once. The tree walker advances by a
//! plan's rows whether it is drawing the plan or only measuring it.

use folio_render::Style;
use folio_style::Theme;
use folio_text::{StyledLine, string_width, truncate_to_width, wrap_styled};

use crate::extract::{
    collect_inputs, extract_spans, extract_spans_from, has_text, heading_spans, list_item_spans,
};
use crate::node::{Node, NodeKind};
use crate::options::RenderOptions;
use crate::positions::FormContext;

/// Columns list text sits right of its bullet.
pub(crate) const BULLET_GAP: usize = 2;
/// Extra indent per nested list level.
pub(crate) const LIST_INDENT: usize = 2;
/// Indent of blockquote text.
pub(crate) const QUOTE_INDENT: usize = 4;
/// Column of the blockquote bar, relative to the margin.
pub(crate) const QUOTE_BAR_OFFSET: usize = 1;
/// Tab stops in code blocks.
const TAB_WIDTH: usize = 4;

/// Section counters for heading numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SectionCounters {
    h1: usize,
    h2: usize,
    h3: usize,
}

impl SectionCounters {
    /// Count a heading and return its section number.
    ///
    /// A level resets the levels below it. A number is produced only when
    /// every enclosing level has been seen, so an H2 before any H1 is
    /// unnumbered.
    pub(crate) fn advance(&mut self, level: u8) -> Option<String> {
        match level {
            0 | 1 => {
                self.h1 += 1;
                self.h2 = 0;
                self.h3 = 0;
                Some(format!("{}.", self.h1))
            }
            2 => {
                self.h2 += 1;
                self.h3 = 0;
                (self.h1 > 0).then(|| format!("{}.{}", self.h1, self.h2))
            }
            _ => {
                self.h3 += 1;
                (self.h1 > 0 && self.h2 > 0)
                    .then(|| format!("{}.{}.{}", self.h1, self.h2, self.h3))
            }
        }
    }

    pub(crate) fn h1_count(&self) -> usize {
        self.h1
    }
}

/// A planned heading.
#[derive(Debug, Clone)]
pub(crate) struct HeadingPlan {
    /// Level clamped to 1..=3.
    pub level: u8,
    pub number: Option<String>,
    /// Plain title, as listed in the table of contents.
    pub title: String,
    /// Wrapped title in the heading style; links keep their targets.
    pub lines: Vec<StyledLine>,
    /// A separating rule precedes H1s after the first.
    pub rule_before: bool,
}

/// Base style of a heading title.
pub(crate) fn heading_style(theme: &Theme, level: u8) -> Style {
    match level {
        1 => theme.heading1,
        2 => theme.heading2,
        _ => theme.heading3,
    }
}

impl HeadingPlan {
    /// Plan a heading, advancing `counters`. Blank headings yield `None`
    /// and leave the counters untouched.
    pub(crate) fn new(
        node: &Node,
        level: u8,
        counters: &mut SectionCounters,
        content_width: usize,
        options: &RenderOptions,
        theme: &Theme,
    ) -> Option<Self> {
        let title = node.normalized_text();
        if title.is_empty() {
            return None;
        }
        let level = level.clamp(1, 3);
        let number = counters
            .advance(level)
            .filter(|_| options.number_headings);
        let avail = match &number {
            Some(n) => content_width.saturating_sub(string_width(n) + 1),
            None => content_width,
        };
        let wrap_width = if avail == 0 { content_width } else { avail };
        let spans = heading_spans(node, heading_style(theme, level), theme);
        let lines = wrap_styled(&spans, wrap_width, false);
        Some(Self {
            level,
            number,
            rule_before: level == 1 && counters.h1_count() > 1,
            title,
            lines,
        })
    }

    pub(crate) fn rows(&self) -> usize {
        match self.level {
            1 => 2 * usize::from(self.rule_before) + self.lines.len() + 2,
            _ => self.lines.len() + 1,
        }
    }
}

/// How an input renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputKind {
    Hidden,
    Button(String),
    Field { display: String },
}

/// A planned form input.
#[derive(Debug, Clone)]
pub(crate) struct InputPlan<'a> {
    pub node: &'a Node,
    pub kind: InputKind,
    pub form: FormContext,
}

impl<'a> InputPlan<'a> {
    pub(crate) fn new(node: &'a Node, form: FormContext) -> Self {
        let kind = match &node.kind {
            NodeKind::Input {
                value, input_type, ..
            } => input_kind(value, input_type),
            _ => InputKind::Hidden,
        };
        Self { node, kind, form }
    }

    pub(crate) fn rows(&self) -> usize {
        usize::from(self.kind != InputKind::Hidden)
    }
}

fn input_kind(value: &str, input_type: &str) -> InputKind {
    let ty = input_type.trim().to_ascii_lowercase();
    let label_or = |fallback: &str| {
        if value.trim().is_empty() {
            fallback.to_owned()
        } else {
            value.to_owned()
        }
    };
    match ty.as_str() {
        "hidden" => InputKind::Hidden,
        "submit" | "image" => InputKind::Button(label_or("Submit")),
        "reset" => InputKind::Button(label_or("Reset")),
        "button" => InputKind::Button(label_or("Button")),
        "password" => InputKind::Field {
            display: "*".repeat(value.chars().count()),
        },
        _ => InputKind::Field {
            display: value.to_owned(),
        },
    }
}

/// Inner width of a text field for a given content width.
pub(crate) fn field_width(options: &RenderOptions, content_width: usize) -> usize {
    options.input_width.min(content_width.saturating_sub(2))
}

/// Where a paragraph's inline content comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ParagraphSource<'a> {
    Node(&'a Node),
    Inline(&'a [Node]),
}

/// A planned paragraph: wrapped text then any inputs inside it.
#[derive(Debug, Clone)]
pub(crate) struct ParagraphPlan<'a> {
    pub lines: Vec<StyledLine>,
    pub inputs: Vec<InputPlan<'a>>,
}

impl<'a> ParagraphPlan<'a> {
    pub(crate) fn new(
        source: ParagraphSource<'a>,
        width: usize,
        justify: bool,
        form: &FormContext,
        theme: &Theme,
    ) -> Self {
        let spans = match source {
            ParagraphSource::Node(node) => extract_spans(node, theme),
            ParagraphSource::Inline(nodes) => extract_spans_from(nodes, theme),
        };
        let lines = if has_text(&spans) {
            wrap_styled(&spans, width, justify)
        } else {
            Vec::new()
        };
        let mut found = Vec::new();
        match source {
            ParagraphSource::Node(node) => collect_inputs(node, form, &mut found),
            ParagraphSource::Inline(nodes) => {
                for node in nodes {
                    collect_inputs(node, form, &mut found);
                }
            }
        }
        let inputs = found
            .into_iter()
            .map(|(node, form)| InputPlan::new(node, form))
            .collect();
        Self { lines, inputs }
    }

    pub(crate) fn rows(&self) -> usize {
        let text = if self.lines.is_empty() {
            0
        } else {
            self.lines.len() + 1
        };
        text + self.inputs.iter().map(InputPlan::rows).sum::<usize>()
    }
}

/// Wrapped lines of one list item, never justified.
pub(crate) fn list_item_lines(
    item: &Node,
    content_width: usize,
    indent: usize,
    theme: &Theme,
) -> Vec<StyledLine> {
    let spans = list_item_spans(item, theme);
    if !has_text(&spans) {
        return Vec::new();
    }
    let width = content_width.saturating_sub(indent + BULLET_GAP);
    wrap_styled(&spans, width, false)
}

/// Lines of a code block: tabs expanded, each cut to `width`.
///
/// A blank block has no lines and renders nothing.
pub(crate) fn code_lines(node: &Node, width: usize) -> Vec<String> {
    let text = node.text_content();
    if text.trim().is_empty() {
        return Vec::new();
    }
    let tab = " ".repeat(TAB_WIDTH);
    text.trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r').replace('\t', &tab);
            truncate_to_width(&line, width)
        })
        .collect()
}

/// Rows of a code block: rule, lines, rule, blank.
pub(crate) fn code_rows(lines: &[String]) -> usize {
    if lines.is_empty() { 0 } else { lines.len() + 3 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_number_nested_sections() {
        let mut c = SectionCounters::default();
        assert_eq!(c.advance(1).as_deref(), Some("1."));
        assert_eq!(c.advance(2).as_deref(), Some("1.1"));
        assert_eq!(c.advance(3).as_deref(), Some("1.1.1"));
        assert_eq!(c.advance(3).as_deref(), Some("1.1.2"));
        assert_eq!(c.advance(2).as_deref(), Some("1.2"));
        assert_eq!(c.advance(1).as_deref(), Some("2."));
        assert_eq!(c.advance(3), None);
    }

    #[test]
    fn orphan_subheadings_are_unnumbered() {
        let mut c = SectionCounters::default();
        assert_eq!(c.advance(2), None);
        assert_eq!(c.advance(3), None);
        assert_eq!(c.advance(1).as_deref(), Some("1."));
    }

    fn texts(lines: &[StyledLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    fn plan(
        node: &Node,
        level: u8,
        c: &mut SectionCounters,
        width: usize,
        opts: &RenderOptions,
    ) -> Option<HeadingPlan> {
        HeadingPlan::new(node, level, c, width, opts, &Theme::default())
    }

    #[test]
    fn heading_rows_by_level() {
        let opts = RenderOptions::default();
        let mut c = SectionCounters::default();
        let first = plan(&Node::heading(1, "One"), 1, &mut c, 40, &opts).unwrap();
        assert!(!first.rule_before);
        assert_eq!(first.rows(), 3);
        let second = plan(&Node::heading(1, "Two"), 1, &mut c, 40, &opts).unwrap();
        assert!(second.rule_before);
        assert_eq!(second.rows(), 5);
        let sub = plan(&Node::heading(2, "Sub"), 2, &mut c, 40, &opts).unwrap();
        assert_eq!(sub.number.as_deref(), Some("2.1"));
        assert_eq!(sub.rows(), 2);
    }

    #[test]
    fn blank_heading_is_skipped() {
        let opts = RenderOptions::default();
        let mut c = SectionCounters::default();
        assert!(plan(&Node::heading(1, "  "), 1, &mut c, 40, &opts).is_none());
        assert_eq!(c, SectionCounters::default());
    }

    #[test]
    fn numbered_heading_wraps_narrower() {
        let opts = RenderOptions::default();
        let mut c = SectionCounters::default();
        // "1." takes 3 columns, leaving 7 for the title.
        let numbered = plan(&Node::heading(1, "aaaa bbbb"), 1, &mut c, 10, &opts).unwrap();
        assert_eq!(texts(&numbered.lines), ["aaaa", "bbbb"]);
        let unnumbered = RenderOptions::new().number_headings(false);
        let mut c = SectionCounters::default();
        let flat = plan(&Node::heading(1, "aaaa bbbb"), 1, &mut c, 10, &unnumbered).unwrap();
        assert_eq!(flat.number, None);
        assert_eq!(texts(&flat.lines), ["aaaa bbbb"]);
    }

    #[test]
    fn heading_title_keeps_link_runs_apart() {
        let theme = Theme::default();
        let h = Node::new(
            NodeKind::Heading { level: 2 },
            vec![
                Node::text("See "),
                Node::link("/docs", vec![Node::text("docs")]),
            ],
        );
        let mut c = SectionCounters::default();
        let p = HeadingPlan::new(&h, 2, &mut c, 40, &RenderOptions::default(), &theme).unwrap();
        assert_eq!(p.title, "See docs");
        assert_eq!(texts(&p.lines), ["See docs"]);
        let first = &p.lines[0][0];
        assert_eq!(first.href, None);
        assert_eq!(first.style, theme.heading2);
        let linked: String = p.lines[0]
            .iter()
            .filter(|s| s.href.as_deref() == Some("/docs"))
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(linked, "docs");
    }

    #[test]
    fn multiline_heading_source_stays_one_group() {
        let mut c = SectionCounters::default();
        let h = Node::heading(1, "  Hello \n  world ");
        let p = plan(&h, 1, &mut c, 40, &RenderOptions::default()).unwrap();
        assert_eq!(texts(&p.lines), ["Hello world"]);
    }

    #[test]
    fn input_kinds() {
        assert_eq!(input_kind("x", "hidden"), InputKind::Hidden);
        assert_eq!(input_kind("", "submit"), InputKind::Button("Submit".into()));
        assert_eq!(input_kind("Go", "SUBMIT"), InputKind::Button("Go".into()));
        assert_eq!(
            input_kind("abc", "password"),
            InputKind::Field {
                display: "***".into()
            }
        );
        assert_eq!(
            input_kind("v", ""),
            InputKind::Field {
                display: "v".into()
            }
        );
    }

    #[test]
    fn paragraph_rows_count_blank_and_inputs() {
        let theme = Theme::default();
        let form = FormContext::default();
        let p = Node::paragraph(vec![
            Node::text("Search"),
            Node::input("q", "", "text"),
            Node::input("t", "x", "hidden"),
        ]);
        let plan = ParagraphPlan::new(ParagraphSource::Node(&p), 20, true, &form, &theme);
        assert_eq!(plan.lines.len(), 1);
        assert_eq!(plan.inputs.len(), 2);
        assert_eq!(plan.rows(), 3);

        let empty = Node::paragraph(vec![Node::text("   ")]);
        let plan = ParagraphPlan::new(ParagraphSource::Node(&empty), 20, true, &form, &theme);
        assert_eq!(plan.rows(), 0);
    }

    #[test]
    fn list_item_lines_skip_nested_and_blank() {
        let theme = Theme::default();
        let item = Node::list_item(vec![
            Node::text("one two"),
            Node::list(vec![Node::list_item(vec![Node::text("inner")])]),
        ]);
        let lines = list_item_lines(&item, 7, 0, &theme);
        assert_eq!(lines.len(), 2);
        assert!(list_item_lines(&Node::list_item(vec![]), 40, 0, &theme).is_empty());
    }

    #[test]
    fn code_lines_expand_tabs_and_truncate() {
        let block = Node::code_block("fn main() {\n\tlet x = 1;\n}\n");
        let lines = code_lines(&block, 12);
        assert_eq!(lines, ["fn main() {", "    let x = ", "}"]);
        assert_eq!(code_rows(&lines), 6);
        assert!(code_lines(&Node::code_block(" \n"), 12).is_empty());
    }
}

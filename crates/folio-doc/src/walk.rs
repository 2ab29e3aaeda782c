#![forbid(unsafe_code)]

//! Block layout walk.
//!
//! [`Walker`] visits the tree in document order, plans each block and
//! advances an absolute row cursor by the plan's height. What happens to
//! a plan is up to the [`Sink`]: the renderer draws it, [`Measure`]
//! ignores it. Rendering and height estimation therefore advance by the
//! same rows for every document.

use folio_render::Style;
use folio_style::Theme;
use folio_text::StyledLine;
use tracing::trace;

use crate::extract::{Block, blocks};
use crate::node::{Node, NodeKind};
use crate::options::RenderOptions;
use crate::plan::{
    HeadingPlan, InputPlan, LIST_INDENT, ParagraphPlan, ParagraphSource, QUOTE_INDENT,
    SectionCounters, code_lines, code_rows, list_item_lines,
};
use crate::positions::FormContext;
use crate::table::TableLayout;

/// Receives planned blocks with the absolute row they start on.
pub(crate) trait Sink {
    fn heading(&mut self, _y: usize, _plan: &HeadingPlan) {}
    /// Text lines start at `y`; inputs follow the trailing blank.
    fn paragraph(&mut self, _y: usize, _indent: usize, _plan: &ParagraphPlan<'_>) {}
    fn input(&mut self, _y: usize, _indent: usize, _plan: &InputPlan<'_>) {}
    fn list_item(&mut self, _y: usize, _indent: usize, _bullet: &str, _lines: &[StyledLine]) {}
    /// Bar beside a blockquote covering `rows` rows from `top`.
    fn quote_bar(&mut self, _top: usize, _rows: usize) {}
    fn code_block(&mut self, _y: usize, _lines: &[String]) {}
    fn table(&mut self, _y: usize, _layout: &TableLayout) {}
}

/// A sink that draws nothing.
pub(crate) struct Measure;

impl Sink for Measure {}

pub(crate) struct Walker<'t, S> {
    pub(crate) sink: S,
    theme: &'t Theme,
    options: &'t RenderOptions,
    content_width: usize,
    y: usize,
    counters: SectionCounters,
    form: FormContext,
}

impl<'t, S: Sink> Walker<'t, S> {
    pub(crate) fn new(
        sink: S,
        theme: &'t Theme,
        options: &'t RenderOptions,
        content_width: usize,
    ) -> Self {
        Self {
            sink,
            theme,
            options,
            content_width,
            y: 0,
            counters: SectionCounters::default(),
            form: FormContext::default(),
        }
    }

    /// Rows advanced so far.
    pub(crate) fn y(&self) -> usize {
        self.y
    }

    pub(crate) fn walk(&mut self, root: &Node) {
        self.block(Block::Node(root));
    }

    fn children(&mut self, children: &[Node]) {
        for block in blocks(children) {
            self.block(block);
        }
    }

    fn block(&mut self, block: Block<'_>) {
        let node = match block {
            Block::Inline(nodes) => {
                trace!(kind = "inline", y = self.y, "layout block");
                self.paragraph(ParagraphSource::Inline(nodes), 0, false);
                return;
            }
            Block::Node(node) => node,
        };
        trace!(kind = node.kind.name(), y = self.y, "layout block");
        match &node.kind {
            NodeKind::Document => self.children(&node.children),
            NodeKind::Heading { level } => self.heading(node, *level),
            NodeKind::List => self.list(node, 0, 0),
            NodeKind::Blockquote => self.blockquote(node),
            NodeKind::CodeBlock => self.code_block(node),
            NodeKind::Table => self.table(node),
            NodeKind::Form { action, method } => self.form(node, action, method),
            NodeKind::Input { .. } => self.input(node),
            NodeKind::TableRow | NodeKind::TableCell { .. } => {}
            // Paragraphs, stray list items and inline roots.
            _ => self.paragraph(ParagraphSource::Node(node), 0, false),
        }
    }

    fn heading(&mut self, node: &Node, level: u8) {
        let Some(plan) = HeadingPlan::new(
            node,
            level,
            &mut self.counters,
            self.content_width,
            self.options,
            self.theme,
        ) else {
            return;
        };
        self.sink.heading(self.y, &plan);
        self.y += plan.rows();
    }

    fn paragraph(&mut self, source: ParagraphSource<'_>, indent: usize, quoted: bool) {
        let width = self.content_width.saturating_sub(indent);
        let mut plan = ParagraphPlan::new(
            source,
            width,
            self.options.justify,
            &self.form,
            self.theme,
        );
        if quoted {
            quote_lines(&mut plan.lines, self.theme.quote);
        }
        self.sink.paragraph(self.y, indent, &plan);
        self.y += plan.rows();
    }

    fn list(&mut self, list: &Node, indent: usize, depth: usize) {
        let options = self.options;
        let start = self.y;
        for child in &list.children {
            match child.kind {
                NodeKind::ListItem => {
                    let lines = list_item_lines(child, self.content_width, indent, self.theme);
                    if !lines.is_empty() {
                        self.sink.list_item(self.y, indent, options.bullet(depth), &lines);
                        self.y += lines.len();
                    }
                    for nested in child.children.iter().filter(|c| c.kind == NodeKind::List) {
                        self.list(nested, indent + LIST_INDENT, depth + 1);
                    }
                }
                NodeKind::List => self.list(child, indent + LIST_INDENT, depth + 1),
                _ => {}
            }
        }
        if depth == 0 && self.y > start {
            self.y += 1;
        }
    }

    fn blockquote(&mut self, node: &Node) {
        let top = self.y;
        for child in node.children.iter().filter(|c| c.kind == NodeKind::Paragraph) {
            self.paragraph(ParagraphSource::Node(child), QUOTE_INDENT, true);
        }
        if self.y > top {
            self.sink.quote_bar(top, self.y - top - 1);
        }
    }

    fn code_block(&mut self, node: &Node) {
        let lines = code_lines(node, self.content_width);
        if lines.is_empty() {
            return;
        }
        self.sink.code_block(self.y, &lines);
        self.y += code_rows(&lines);
    }

    fn table(&mut self, node: &Node) {
        let Some(layout) = TableLayout::compute(node, self.content_width) else {
            return;
        };
        self.sink.table(self.y, &layout);
        self.y += layout.height();
    }

    fn form(&mut self, node: &Node, action: &str, method: &str) {
        let inner = FormContext {
            action: action.to_owned(),
            method: method.to_owned(),
        };
        let outer = std::mem::replace(&mut self.form, inner);
        self.children(&node.children);
        self.form = outer;
    }

    fn input(&mut self, node: &Node) {
        let plan = InputPlan::new(node, self.form.clone());
        self.sink.input(self.y, 0, &plan);
        self.y += plan.rows();
    }
}

/// Blockquote text takes the quote style; links keep theirs.
fn quote_lines(lines: &mut [StyledLine], quote: Style) {
    for span in lines.iter_mut().flatten() {
        if span.href.is_none() {
            span.style = span.style.patch(quote);
        }
    }
}

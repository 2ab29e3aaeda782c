#![forbid(unsafe_code)]

//! Document renderer.
//!
//! A [`Renderer`] owns one canvas, a theme and layout options. Each call
//! to [`render`](Renderer::render) clears the canvas, walks the document
//! and records where links, inputs, headings and paragraphs landed. All
//! recorded rows are absolute document rows, so they stay valid as jump
//! targets after scrolling; the lists themselves are rebuilt every render.
//!
//! # Layout
//!
//! The content column is `min(max_content_width, width - 2 * min_margin)`
//! wide and centered. Blocks stack vertically:
//!
//! | block        | rows                                              |
//! |--------------|---------------------------------------------------|
//! | H1           | rule + blank (after the first H1), title, `═` rule, blank |
//! | H2, H3       | title, blank                                      |
//! | paragraph    | wrapped lines, blank, then one row per input      |
//! | list         | one row per wrapped item line, blank after the top level |
//! | blockquote   | its paragraphs indented by 4, with a bar          |
//! | code block   | rule, lines, rule, blank                          |
//! | table        | bordered rows, blank                              |
//!
//! Rows outside the viewport are laid out but never written.

use std::io::{self, Write};

use folio_core::TerminalCapabilities;
use folio_render::{Canvas, Cell, Draw, Style};
use folio_style::Theme;
use folio_text::{StyledLine, string_width, truncate_to_width};
use tracing::{debug, debug_span};

use crate::height::{clamp_scroll, content_height, max_scroll};
use crate::navigation;
use crate::node::{Node, NodeKind};
use crate::options::RenderOptions;
use crate::overlay::{self, BufferEntry};
use crate::plan::{
    BULLET_GAP, HeadingPlan, InputKind, InputPlan, ParagraphPlan, QUOTE_BAR_OFFSET, field_width,
};
use crate::positions::{Heading, Input, Link, is_image_href};
use crate::table::{TableLayout, TableLine};
use crate::walk::{Sink, Walker};

/// Positions recorded by the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub scroll_y: usize,
    pub margin: usize,
    pub content_width: usize,
    /// Rows the whole document occupies.
    pub content_height: usize,
    pub links: Vec<Link>,
    pub inputs: Vec<Input>,
    pub headings: Vec<Heading>,
    /// Absolute first row of every rendered paragraph, ascending.
    pub paragraphs: Vec<usize>,
}

/// Renders documents onto an owned canvas.
#[derive(Debug, Clone)]
pub struct Renderer {
    canvas: Canvas,
    theme: Theme,
    options: RenderOptions,
    frame: Frame,
}

impl Renderer {
    /// A renderer for a `width` x `height` viewport with the default
    /// theme and options.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            theme: Theme::default(),
            options: RenderOptions::default(),
            frame: Frame::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn width(&self) -> u16 {
        self.canvas.width()
    }

    pub fn height(&self) -> u16 {
        self.canvas.height()
    }

    /// Resize the viewport. Takes effect on the next render.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.canvas.resize(width, height);
    }

    /// Everything recorded by the last render.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn links(&self) -> &[Link] {
        &self.frame.links
    }

    pub fn inputs(&self) -> &[Input] {
        &self.frame.inputs
    }

    pub fn headings(&self) -> &[Heading] {
        &self.frame.headings
    }

    pub fn paragraphs(&self) -> &[usize] {
        &self.frame.paragraphs
    }

    pub fn scroll_y(&self) -> usize {
        self.frame.scroll_y
    }

    /// Render `doc` with the viewport's top at document row `scroll_y`.
    pub fn render(&mut self, doc: &Node, scroll_y: usize) {
        let (margin, content_width) = self.options.geometry(self.canvas.width());
        let _span = debug_span!(
            "document_render",
            width = self.canvas.width(),
            height = self.canvas.height(),
            scroll_y,
            content_width
        )
        .entered();

        self.canvas.clear();
        self.frame = Frame {
            scroll_y,
            margin,
            content_width,
            ..Frame::default()
        };
        let painter = Painter {
            canvas: &mut self.canvas,
            theme: &self.theme,
            options: &self.options,
            frame: &mut self.frame,
        };
        let mut walker = Walker::new(painter, &self.theme, &self.options, content_width);
        walker.walk(doc);
        let rows = walker.y();
        self.frame.content_height = rows;

        debug!(
            rows,
            links = self.frame.links.len(),
            inputs = self.frame.inputs.len(),
            headings = self.frame.headings.len(),
            paragraphs = self.frame.paragraphs.len(),
            "document rendered"
        );
    }

    /// Rows `doc` occupies at the current width, without drawing.
    pub fn content_height(&self, doc: &Node) -> usize {
        content_height(doc, self.canvas.width(), &self.options, &self.theme)
    }

    /// Largest useful scroll offset for `doc`.
    pub fn max_scroll(&self, doc: &Node) -> usize {
        max_scroll(self.content_height(doc), usize::from(self.canvas.height()))
    }

    /// `scroll_y` limited to `[0, max_scroll(doc)]`.
    pub fn clamp_scroll(&self, doc: &Node, scroll_y: usize) -> usize {
        clamp_scroll(
            scroll_y,
            self.content_height(doc),
            usize::from(self.canvas.height()),
        )
    }

    /// Links of the last frame that are on screen, in document order.
    pub fn visible_links(&self) -> Vec<&Link> {
        let height = usize::from(self.canvas.height());
        self.frame
            .links
            .iter()
            .filter(|l| l.is_visible(self.frame.scroll_y, height))
            .collect()
    }

    /// Inputs of the last frame that are on screen, in document order.
    pub fn visible_inputs(&self) -> Vec<&Input> {
        let height = usize::from(self.canvas.height());
        self.frame
            .inputs
            .iter()
            .filter(|i| i.is_visible(self.frame.scroll_y, height))
            .collect()
    }

    /// First paragraph starting below row `y`.
    pub fn next_paragraph(&self, y: usize) -> Option<usize> {
        navigation::next_paragraph(&self.frame.paragraphs, y)
    }

    /// Last paragraph starting above row `y`.
    pub fn prev_paragraph(&self, y: usize) -> Option<usize> {
        navigation::prev_paragraph(&self.frame.paragraphs, y)
    }

    /// Heading whose section contains row `y`.
    pub fn heading_at(&self, y: usize) -> Option<&Heading> {
        navigation::heading_at(&self.frame.headings, y)
    }

    /// Jump labels over the visible links; `labels[i]` goes with the
    /// `i`-th entry of [`visible_links`](Self::visible_links).
    pub fn render_link_labels(&mut self, labels: &[String], typed: &str) {
        let height = usize::from(self.canvas.height());
        let scroll_y = self.frame.scroll_y;
        let links: Vec<&Link> = self
            .frame
            .links
            .iter()
            .filter(|l| l.is_visible(scroll_y, height))
            .collect();
        overlay::render_link_labels(&mut self.canvas, &self.theme, &links, labels, typed, scroll_y);
    }

    /// Jump labels over the visible inputs.
    pub fn render_input_labels(&mut self, labels: &[String], typed: &str) {
        let height = usize::from(self.canvas.height());
        let scroll_y = self.frame.scroll_y;
        let inputs: Vec<&Input> = self
            .frame
            .inputs
            .iter()
            .filter(|i| i.is_visible(scroll_y, height))
            .collect();
        overlay::render_input_labels(&mut self.canvas, &self.theme, &inputs, labels, typed, scroll_y);
    }

    /// Table of contents of the last rendered document.
    pub fn render_toc(&mut self, labels: &[String], typed: &str, scroll: usize) {
        overlay::render_toc(
            &mut self.canvas,
            &self.theme,
            &self.frame.headings,
            labels,
            typed,
            scroll,
        );
    }

    /// Navigation links supplied by the caller.
    pub fn render_navigation(&mut self, links: &[Link], labels: &[String], typed: &str, scroll: usize) {
        overlay::render_navigation(&mut self.canvas, &self.theme, links, labels, typed, scroll);
    }

    /// Every link of the last rendered document.
    pub fn render_link_index(&mut self, labels: &[String], typed: &str, scroll: usize) {
        overlay::render_link_index(
            &mut self.canvas,
            &self.theme,
            &self.frame.links,
            labels,
            typed,
            scroll,
        );
    }

    /// Open buffers.
    pub fn render_buffer_list(
        &mut self,
        buffers: &[BufferEntry],
        labels: &[String],
        typed: &str,
        scroll: usize,
    ) {
        overlay::render_buffer_list(&mut self.canvas, &self.theme, buffers, labels, typed, scroll);
    }

    /// Serialize the canvas as an ANSI frame.
    pub fn present<W: Write>(&self, writer: W, caps: &TerminalCapabilities) -> io::Result<()> {
        self.canvas.render_to(writer, caps)
    }
}

/// Draws planned blocks onto the canvas and records positions.
struct Painter<'r> {
    canvas: &'r mut Canvas,
    theme: &'r Theme,
    options: &'r RenderOptions,
    frame: &'r mut Frame,
}

fn col(x: usize) -> i32 {
    i32::try_from(x).unwrap_or(i32::MAX)
}

impl Painter<'_> {
    /// Canvas row of absolute row `y`, if on screen.
    fn screen_row(&self, y: usize) -> Option<i32> {
        let row = y.checked_sub(self.frame.scroll_y)?;
        if row >= usize::from(self.canvas.height()) {
            return None;
        }
        i32::try_from(row).ok()
    }

    fn text(&mut self, x: usize, y: usize, text: &str, style: Style) {
        self.linked_text(x, y, text, style, None);
    }

    fn linked_text(&mut self, x: usize, y: usize, text: &str, style: Style, href: Option<&str>) {
        let Some(row) = self.screen_row(y) else {
            return;
        };
        let link = href.map_or(Cell::LINK_ID_NONE, |h| self.canvas.register_link(h));
        self.canvas.write_str_linked(col(x), row, text, style, link);
    }

    fn rule(&mut self, y: usize, ch: char, style: Style) {
        let Some(row) = self.screen_row(y) else {
            return;
        };
        let width = u16::try_from(self.frame.content_width).unwrap_or(u16::MAX);
        self.canvas
            .draw_hline(col(self.frame.margin), row, width, ch, style);
    }

    fn record_link(&mut self, href: &str, text: &str, x: usize, y: usize) {
        let trimmed = text.trim_start();
        let x = x + (text.len() - trimmed.len());
        let trimmed = trimmed.trim_end();
        if trimmed.is_empty() {
            return;
        }
        self.frame.links.push(Link {
            href: href.to_owned(),
            text: trimmed.to_owned(),
            x,
            y,
            length: string_width(trimmed),
            is_image: is_image_href(href),
        });
    }

    /// Draw a styled line and record its links.
    ///
    /// Runs of one href separated only by unlinked spaces (justification
    /// padding) are recorded as a single link.
    fn styled_line(&mut self, x: usize, y: usize, line: &StyledLine) {
        let mut cx = x;
        // (href, text, start column) of the link being collected.
        let mut open: Option<(String, String, usize)> = None;
        let mut gap = String::new();
        for span in line {
            self.linked_text(cx, y, &span.text, span.style, span.href.as_deref());
            match &span.href {
                Some(href) => {
                    let continues = open.as_ref().is_some_and(|(current, _, _)| current == href);
                    if continues {
                        if let Some((_, text, _)) = open.as_mut() {
                            text.push_str(&gap);
                            text.push_str(&span.text);
                        }
                    } else {
                        if let Some((href, text, start)) = open.take() {
                            self.record_link(&href, &text, start, y);
                        }
                        open = Some((href.clone(), span.text.clone(), cx));
                    }
                    gap.clear();
                }
                None if open.is_some() && span.text.chars().all(|c| c == ' ') => {
                    gap.push_str(&span.text);
                }
                None => {
                    if let Some((href, text, start)) = open.take() {
                        self.record_link(&href, &text, start, y);
                    }
                    gap.clear();
                }
            }
            cx += span.width();
        }
        if let Some((href, text, start)) = open {
            self.record_link(&href, &text, start, y);
        }
    }
}

impl Sink for Painter<'_> {
    fn heading(&mut self, y: usize, plan: &HeadingPlan) {
        let margin = self.frame.margin;
        let mut y = y;
        if plan.rule_before {
            self.rule(y, '─', self.theme.rule);
            y += 2;
        }
        self.frame.headings.push(Heading {
            level: plan.level,
            number: plan.number.clone(),
            text: plan.title.clone(),
            y,
        });
        for (i, line) in plan.lines.iter().enumerate() {
            self.styled_line(margin, y + i, line);
        }
        if let (Some(number), false) = (&plan.number, plan.lines.is_empty()) {
            let x = margin + self.frame.content_width.saturating_sub(string_width(number));
            self.text(x, y, number, self.theme.heading_number);
        }
        if plan.level == 1 {
            self.rule(y + plan.lines.len(), '═', self.theme.rule);
        }
    }

    fn paragraph(&mut self, y: usize, indent: usize, plan: &ParagraphPlan<'_>) {
        let x = self.frame.margin + indent;
        let mut row = y;
        if !plan.lines.is_empty() {
            self.frame.paragraphs.push(y);
            for line in &plan.lines {
                self.styled_line(x, row, line);
                row += 1;
            }
            row += 1;
        }
        for input in &plan.inputs {
            self.input(row, indent, input);
            row += input.rows();
        }
    }

    fn input(&mut self, y: usize, indent: usize, plan: &InputPlan<'_>) {
        let x = self.frame.margin + indent;
        match &plan.kind {
            InputKind::Hidden => {}
            InputKind::Button(label) => {
                self.text(x, y, &format!("[ {label} ]"), self.theme.button);
            }
            InputKind::Field { display } => {
                let width = field_width(
                    self.options,
                    self.frame.content_width.saturating_sub(indent),
                );
                let shown = truncate_to_width(display, width);
                let pad = width.saturating_sub(string_width(&shown));
                self.text(x, y, "[", self.theme.text);
                self.text(x + 1, y, &format!("{shown}{}", " ".repeat(pad)), self.theme.input);
                self.text(x + 1 + width, y, "]", self.theme.text);
                if let NodeKind::Input {
                    name,
                    value,
                    input_type,
                } = &plan.node.kind
                {
                    self.frame.inputs.push(Input {
                        name: name.clone(),
                        value: value.clone(),
                        input_type: input_type.clone(),
                        x: x + 1,
                        y,
                        width,
                        form_action: plan.form.action.clone(),
                        form_method: plan.form.method.clone(),
                    });
                }
            }
        }
    }

    fn list_item(&mut self, y: usize, indent: usize, bullet: &str, lines: &[StyledLine]) {
        let x = self.frame.margin + indent;
        self.text(x, y, bullet, self.theme.text);
        for (i, line) in lines.iter().enumerate() {
            self.styled_line(x + BULLET_GAP, y + i, line);
        }
    }

    fn quote_bar(&mut self, top: usize, rows: usize) {
        let x = self.frame.margin + QUOTE_BAR_OFFSET;
        for y in top..top + rows {
            self.text(x, y, "│", self.theme.quote_bar);
        }
    }

    fn code_block(&mut self, y: usize, lines: &[String]) {
        self.rule(y, '─', self.theme.rule);
        for (i, line) in lines.iter().enumerate() {
            self.text(self.frame.margin, y + 1 + i, line, self.theme.code);
        }
        self.rule(y + 1 + lines.len(), '─', self.theme.rule);
    }

    fn table(&mut self, y: usize, layout: &TableLayout) {
        let left = self.frame.margin + layout.offset;
        let border = self.theme.table_border;
        for (i, line) in layout.lines().into_iter().enumerate() {
            let row_y = y + i;
            let TableLine::Row(r) = line else {
                self.text(left, row_y, &layout.border(line), border);
                continue;
            };
            self.text(left, row_y, "│", border);
            for (c, cell) in layout.rows[r].iter().enumerate() {
                let cx = left + layout.column_x(c);
                let style = if cell.is_header {
                    self.theme.table_header
                } else if cell.href.is_some() {
                    self.theme.link
                } else {
                    self.theme.text
                };
                let text = layout.cell_text(r, c);
                self.text(cx, row_y, &text, style);
                if let Some(href) = &cell.href {
                    // Only the label carries the link, not its padding.
                    let label = text.trim_start();
                    let lx = cx + (text.len() - label.len());
                    self.linked_text(lx, row_y, label.trim_end(), style, Some(href));
                    self.record_link(href, &text, cx, row_y);
                }
                self.text(cx + layout.widths[c] + 1, row_y, "│", border);
            }
        }
    }
}

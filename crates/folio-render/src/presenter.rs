#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission of a whole canvas.
//!
//! The presenter writes every row of a [`Canvas`] as one frame. It
//! remembers the last style and hyperlink it emitted and only writes a
//! new SGR or OSC 8 sequence when a cell differs from its predecessor, so
//! runs of identically styled cells cost one escape sequence.
//!
//! ```
//! use folio_core::TerminalCapabilities;
//! use folio_render::{Canvas, Presenter, Style};
//!
//! let mut canvas = Canvas::new(4, 1);
//! canvas.write_str(0, 0, "hi", Style::new().bold());
//! let mut presenter = Presenter::new(Vec::new(), TerminalCapabilities::basic());
//! presenter.present(&canvas).unwrap();
//! let bytes = presenter.into_inner().unwrap();
//! assert!(String::from_utf8(bytes).unwrap().contains("\x1b[1mhi"));
//! ```

use std::io::{self, BufWriter, Write};

use folio_core::TerminalCapabilities;
use tracing::{debug_span, trace};

use crate::ansi;
use crate::canvas::Canvas;
use crate::cell::Cell;
use crate::color::ColorProfile;
use crate::style::Style;

/// Size of the internal write buffer.
const BUFFER_CAPACITY: usize = 64 * 1024;

/// State-tracked ANSI presenter.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    /// Style last emitted (None = unknown, force a reset).
    current_style: Option<Style>,
    /// Hyperlink currently open.
    current_link: Option<u32>,
    capabilities: TerminalCapabilities,
    profile: ColorProfile,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter writing to `writer`.
    pub fn new(writer: W, capabilities: TerminalCapabilities) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            current_link: None,
            profile: ColorProfile::from_flags(
                capabilities.true_color,
                capabilities.colors_256,
                capabilities.no_color,
            ),
            capabilities,
        }
    }

    /// Terminal capabilities this presenter targets.
    #[inline]
    pub fn capabilities(&self) -> &TerminalCapabilities {
        &self.capabilities
    }

    /// Color profile colors are downgraded to.
    #[inline]
    pub fn profile(&self) -> ColorProfile {
        self.profile
    }

    /// Write the full canvas as one frame.
    ///
    /// Each row starts with an absolute cursor move. The frame ends with
    /// an SGR reset, any open hyperlink is closed, and output is flushed.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let _span = debug_span!(
            "present",
            width = canvas.width(),
            height = canvas.height()
        )
        .entered();

        self.current_style = None;
        for y in 0..canvas.height() {
            ansi::cup(&mut self.writer, y, 0)?;
            for x in 0..canvas.width() {
                let cell = canvas.get(i32::from(x), i32::from(y));
                self.emit_cell(&cell, canvas)?;
            }
            self.close_link()?;
        }

        ansi::sgr_reset(&mut self.writer)?;
        self.current_style = None;
        trace!("frame presented");
        self.writer.flush()
    }

    fn emit_cell(&mut self, cell: &Cell, canvas: &Canvas) -> io::Result<()> {
        if cell.is_continuation() {
            return Ok(());
        }
        self.emit_style_changes(cell.style)?;
        self.emit_link_changes(cell.link, canvas)?;
        match cell.content.as_char() {
            Some(ch) => {
                let mut buf = [0u8; 4];
                self.writer.write_all(ch.encode_utf8(&mut buf).as_bytes())
            }
            None => self.writer.write_all(b" "),
        }
    }

    /// Reset and re-apply when the style differs from the last one.
    fn emit_style_changes(&mut self, style: Style) -> io::Result<()> {
        if self.current_style == Some(style) {
            return Ok(());
        }
        ansi::sgr_reset(&mut self.writer)?;
        if let Some(fg) = style.fg.and_then(|c| c.downgrade(self.profile)) {
            ansi::sgr_fg(&mut self.writer, fg)?;
        }
        if let Some(bg) = style.bg.and_then(|c| c.downgrade(self.profile)) {
            ansi::sgr_bg(&mut self.writer, bg)?;
        }
        ansi::sgr_flags(&mut self.writer, style.flags)?;
        self.current_style = Some(style);
        Ok(())
    }

    fn emit_link_changes(&mut self, link: u32, canvas: &Canvas) -> io::Result<()> {
        let wanted = if self.capabilities.osc8_hyperlinks && link != Cell::LINK_ID_NONE {
            canvas.links().get(link).map(|url| (link, url))
        } else {
            None
        };
        if self.current_link == wanted.map(|(id, _)| id) {
            return Ok(());
        }
        self.close_link()?;
        if let Some((id, url)) = wanted {
            ansi::hyperlink_start(&mut self.writer, url)?;
            self.current_link = Some(id);
        }
        Ok(())
    }

    fn close_link(&mut self) -> io::Result<()> {
        if self.current_link.take().is_some() {
            ansi::hyperlink_end(&mut self.writer)?;
        }
        Ok(())
    }

    /// Get the inner writer, flushing buffered output first.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Rgb};

    fn present(canvas: &Canvas, caps: TerminalCapabilities) -> String {
        let mut presenter = Presenter::new(Vec::new(), caps);
        presenter.present(canvas).unwrap();
        String::from_utf8(presenter.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn style_runs_are_coalesced() {
        let mut canvas = Canvas::new(6, 1);
        canvas.write_str(0, 0, "aaa", Style::new().bold());
        canvas.write_str(3, 0, "bbb", Style::new());
        let out = present(&canvas, TerminalCapabilities::basic());
        assert_eq!(out.matches("\x1b[1m").count(), 1);
        assert!(out.contains("\x1b[1maaa\x1b[0mbbb"));
    }

    #[test]
    fn each_row_starts_with_cursor_move() {
        let canvas = Canvas::new(2, 3);
        let out = present(&canvas, TerminalCapabilities::basic());
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[2;1H"));
        assert!(out.contains("\x1b[3;1H"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn frame_leaves_screen_and_cursor_alone() {
        let mut canvas = Canvas::new(4, 2);
        canvas.write_str(0, 1, "ok", Style::new());
        let out = present(&canvas, TerminalCapabilities::modern());
        assert!(!out.contains("\x1b[2J"));
        assert!(!out.contains("\x1b[?25"));
    }

    #[test]
    fn true_color_downgrades_for_ansi16() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set(0, 0, 'x', Style::new().fg(Color::Rgb(Rgb::new(255, 0, 0))));
        let modern = present(&canvas, TerminalCapabilities::modern());
        assert!(modern.contains("\x1b[38;2;255;0;0m"));
        let basic = present(&canvas, TerminalCapabilities::basic());
        assert!(!basic.contains("38;2"));
        assert!(basic.contains("\x1b[91m") || basic.contains("\x1b[31m"));
    }

    #[test]
    fn no_color_keeps_attributes_only() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set(0, 0, 'x', Style::new().fg(Color::rgb(1, 2, 3)).underline());
        let caps = TerminalCapabilities::builder().no_color(true).build();
        let out = present(&canvas, caps);
        assert!(!out.contains("38;"));
        assert!(out.contains("\x1b[4m"));
    }

    #[test]
    fn continuation_cells_are_skipped() {
        let mut canvas = Canvas::new(3, 1);
        canvas.write_str(0, 0, "中a", Style::new());
        let out = present(&canvas, TerminalCapabilities::basic());
        assert!(out.contains("中a"));
    }

    #[test]
    fn hyperlinks_open_and_close() {
        let mut canvas = Canvas::new(5, 1);
        let id = canvas.register_link("https://a.test");
        canvas.write_str_linked(0, 0, "ab", Style::new(), id);
        let out = present(&canvas, TerminalCapabilities::modern());
        assert_eq!(out.matches("\x1b]8;;https://a.test\x1b\\").count(), 1);
        assert!(out.contains("ab\x1b]8;;\x1b\\"));
    }

    #[test]
    fn hyperlinks_suppressed_without_support() {
        let mut canvas = Canvas::new(5, 1);
        let id = canvas.register_link("https://a.test");
        canvas.write_str_linked(0, 0, "ab", Style::new(), id);
        let out = present(&canvas, TerminalCapabilities::basic());
        assert!(!out.contains("\x1b]8"));
    }
}

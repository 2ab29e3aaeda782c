#![forbid(unsafe_code)]

//! Fixed-size grid of styled cells.
//!
//! All writes clip silently: coordinates are signed so callers can lay
//! out content above or left of the visible area and let the canvas
//! discard it. Reads outside the grid return a blank cell.
//!
//! ```
//! use folio_render::{Canvas, Style};
//!
//! let mut canvas = Canvas::new(10, 2);
//! let used = canvas.write_str(0, 0, "héllo", Style::new().bold());
//! assert_eq!(used, 5);
//! assert_eq!(canvas.row_text(0).trim_end(), "héllo");
//! ```

use std::io::{self, Write};

use folio_core::{Rect, TerminalCapabilities};

use crate::cell::Cell;
use crate::link_registry::LinkRegistry;
use crate::presenter::Presenter;
use crate::style::{Style, StyleFlags};
use crate::text_width::char_width;

/// A `width × height` grid of [`Cell`]s plus the hyperlink table its
/// cells refer to.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    links: LinkRegistry,
}

impl Canvas {
    /// Create a blank canvas. Zero sizes are allowed; such a canvas
    /// ignores every write.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; size],
            links: LinkRegistry::new(),
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rectangle, anchored at the origin.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at `(x, y)`, or a blank cell outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y).map_or(Cell::BLANK, |i| self.cells[i])
    }

    /// Write a single rune with a style.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, ch: char, style: Style) {
        self.set_cell(x, y, Cell::from_char(ch).with_style(style));
    }

    /// Write a cell, keeping wide runes intact.
    ///
    /// A width-2 rune is written together with its continuation cell, or
    /// not at all when the second column falls outside the grid.
    /// Overwriting either half of an existing wide rune blanks the other
    /// half. Zero-width runes are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        let width = cell.width();
        if width == 0 {
            return;
        }
        let Some(idx) = self.index(x, y) else {
            return;
        };
        if width >= 2 {
            if self.index(x + 1, y).is_none() {
                return;
            }
            self.cleanup_overlap(x, y);
            self.cleanup_overlap(x + 1, y);
            self.cells[idx] = cell;
            self.cells[idx + 1] = Cell::CONTINUATION
                .with_style(cell.style)
                .with_link(cell.link);
        } else {
            self.cleanup_overlap(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Blank the orphaned half of a wide rune about to be overwritten at
    /// `(x, y)`.
    fn cleanup_overlap(&mut self, x: i32, y: i32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let current = self.cells[idx];
        if current.is_continuation() {
            if let Some(head) = self.index(x - 1, y)
                && self.cells[head].width() >= 2
            {
                self.cells[head] = Cell::BLANK;
            }
        } else if current.width() >= 2
            && let Some(tail) = self.index(x + 1, y)
            && self.cells[tail].is_continuation()
        {
            self.cells[tail] = Cell::BLANK;
        }
    }

    /// Write `text` left to right starting at `(x, y)`.
    ///
    /// Advances by display width, skips zero-width runes, and stops at
    /// the right edge. Returns the number of columns consumed, which is 0
    /// when the row is outside the grid.
    pub fn write_str(&mut self, x: i32, y: i32, text: &str, style: Style) -> usize {
        self.write_str_linked(x, y, text, style, Cell::LINK_ID_NONE)
    }

    /// [`write_str`](Self::write_str) with every written cell tagged with
    /// a hyperlink id from [`register_link`](Self::register_link).
    pub fn write_str_linked(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: Style,
        link: u32,
    ) -> usize {
        if y < 0 || y >= i32::from(self.height) {
            return 0;
        }
        let right = i32::from(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as i32;
            if w == 0 {
                continue;
            }
            if col + w > right {
                break;
            }
            self.set_cell(col, y, Cell::from_char(ch).with_style(style).with_link(link));
            col += w;
        }
        (col - x).max(0) as usize
    }

    /// Fill a rectangle with one rune and style.
    pub fn fill(&mut self, rect: Rect, ch: char, style: Style) {
        let area = rect.intersection(&self.area());
        let step = char_width(ch).max(1) as u16;
        for y in area.y..area.bottom() {
            let mut x = area.x;
            while x < area.right() {
                self.set(i32::from(x), i32::from(y), ch, style);
                x += step;
            }
        }
    }

    /// Patch the style of every cell in a rectangle, keeping content.
    pub fn apply_style(&mut self, rect: Rect, style: Style) {
        let area = rect.intersection(&self.area());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index(i32::from(x), i32::from(y)) {
                    self.cells[i].style = self.cells[i].style.patch(style);
                }
            }
        }
    }

    /// Reset every cell to blank and forget registered links.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
        self.links.clear();
    }

    /// Dim the whole canvas, used as an overlay backdrop.
    ///
    /// Bold and reverse video are dropped along the way.
    pub fn dim_all(&mut self) {
        for cell in &mut self.cells {
            cell.style = cell
                .style
                .remove(StyleFlags::REVERSE | StyleFlags::BOLD)
                .add(StyleFlags::DIM);
        }
    }

    /// Change the size. Content is discarded.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Text of one row, continuation cells skipped and blanks as spaces.
    ///
    /// Out-of-range rows yield an empty string.
    pub fn row_text(&self, y: i32) -> String {
        if y < 0 || y >= i32::from(self.height) {
            return String::new();
        }
        (0..i32::from(self.width))
            .filter_map(|x| self.get(x, y).symbol())
            .collect()
    }

    /// Register a hyperlink URL for use with
    /// [`write_str_linked`](Self::write_str_linked).
    pub fn register_link(&mut self, url: &str) -> u32 {
        self.links.register(url)
    }

    /// The canvas hyperlink table.
    #[inline]
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// Serialize for a modern true-color terminal.
    pub fn render(&self) -> String {
        self.render_with(&TerminalCapabilities::modern())
    }

    /// Serialize for the given terminal capabilities.
    pub fn render_with(&self, caps: &TerminalCapabilities) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.render_to(&mut buf, caps);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serialize the grid into `writer` as one escape-coded frame.
    pub fn render_to<W: Write>(&self, writer: W, caps: &TerminalCapabilities) -> io::Result<()> {
        Presenter::new(writer, *caps).present(self)
    }
}

#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! A `Cell` is one terminal column: its content, its style, and an
//! optional hyperlink id (resolved through the canvas
//! [`LinkRegistry`](crate::link_registry::LinkRegistry)).
//!
//! # Wide characters
//!
//! A rune of display width 2 occupies a head cell holding the rune and a
//! following [`CellContent::Continuation`] cell. Continuation cells are
//! skipped on output; the terminal advances two columns for the head.

use crate::style::Style;
use crate::text_width::char_width;

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Nothing written; presented as a space.
    #[default]
    Empty,
    /// A single rune.
    Char(char),
    /// Second column of a wide rune in the previous cell.
    Continuation,
}

impl CellContent {
    /// Display width of this content.
    #[inline]
    pub fn width(self) -> usize {
        match self {
            Self::Empty => 1,
            Self::Char(c) => char_width(c),
            Self::Continuation => 0,
        }
    }

    /// The rune shown for this cell, if any.
    #[inline]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Character content.
    pub content: CellContent,
    /// Visual style.
    pub style: Style,
    /// Hyperlink id (0 = no link).
    pub link: u32,
}

impl Cell {
    /// Sentinel link id for "no hyperlink".
    pub const LINK_ID_NONE: u32 = 0;

    /// A continuation cell (placeholder for wide characters).
    pub const CONTINUATION: Self = Self {
        content: CellContent::Continuation,
        style: Style::PLAIN,
        link: Self::LINK_ID_NONE,
    };

    /// A blank, unstyled cell.
    pub const BLANK: Self = Self {
        content: CellContent::Empty,
        style: Style::PLAIN,
        link: Self::LINK_ID_NONE,
    };

    /// Create a cell from a single character with the plain style.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            style: Style::PLAIN,
            link: Self::LINK_ID_NONE,
        }
    }

    /// Set the style.
    #[inline]
    #[must_use]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the hyperlink id.
    #[inline]
    #[must_use]
    pub const fn with_link(mut self, link: u32) -> Self {
        self.link = link;
        self
    }

    /// Check if this is a continuation cell.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }

    /// Check if nothing was written to this cell.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Display width of the cell content.
    #[inline]
    pub fn width(&self) -> usize {
        self.content.width()
    }

    /// The rune this cell shows; blank and continuation cells read as `' '`
    /// and `None` respectively.
    #[inline]
    pub fn symbol(&self) -> Option<char> {
        match self.content {
            CellContent::Empty => Some(' '),
            CellContent::Char(c) => Some(c),
            CellContent::Continuation => None,
        }
    }
}

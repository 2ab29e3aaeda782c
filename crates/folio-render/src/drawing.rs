#![forbid(unsafe_code)]

//! Drawing primitives on top of [`Canvas::set`].
//!
//! Tables, rules and overlay boxes all draw through these helpers, with
//! the glyphs supplied by a [`BorderChars`] set.

use folio_core::Rect;

use crate::canvas::Canvas;
use crate::style::Style;
use crate::text_width::char_width;

/// Characters used to draw borders, rules and table grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// `├`: vertical edge meeting a horizontal rule from the right.
    pub tee_left: char,
    /// `┤`
    pub tee_right: char,
    /// `┬`
    pub tee_top: char,
    /// `┴`
    pub tee_bottom: char,
    /// `┼`
    pub cross: char,
}

impl BorderChars {
    /// Light box-drawing characters.
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        tee_left: '├',
        tee_right: '┤',
        tee_top: '┬',
        tee_bottom: '┴',
        cross: '┼',
    };

    /// Light lines with rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        ..Self::SQUARE
    };

    /// Double lines.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
        tee_left: '╠',
        tee_right: '╣',
        tee_top: '╦',
        tee_bottom: '╩',
        cross: '╬',
    };

    /// Heavy lines.
    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
        tee_left: '┣',
        tee_right: '┫',
        tee_top: '┳',
        tee_bottom: '┻',
        cross: '╋',
    };

    /// Heavy horizontal rule crossing light verticals, for the line under
    /// a table header.
    pub const HEADER_RULE: Self = Self {
        horizontal: '━',
        tee_left: '┝',
        tee_right: '┥',
        cross: '┿',
        ..Self::SQUARE
    };

    /// Plain ASCII for terminals without box-drawing glyphs.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        tee_left: '+',
        tee_right: '+',
        tee_top: '+',
        tee_bottom: '+',
        cross: '+',
    };
}

/// Extension trait for drawing on a [`Canvas`].
pub trait Draw {
    /// Draw `width` copies of `ch` to the right of `(x, y)`.
    fn draw_hline(&mut self, x: i32, y: i32, width: u16, ch: char, style: Style);

    /// Draw `height` copies of `ch` downward from `(x, y)`.
    fn draw_vline(&mut self, x: i32, y: i32, height: u16, ch: char, style: Style);

    /// Print text, stopping before `max_x` (exclusive).
    ///
    /// Returns the column after the last rune written.
    fn print_text_clipped(&mut self, x: i32, y: i32, text: &str, style: Style, max_x: i32)
    -> i32;

    /// Draw a border along the edges of `rect`.
    fn draw_border(&mut self, rect: Rect, chars: BorderChars, style: Style);

    /// Draw a border and fill the interior with spaces in `fill`.
    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border: Style, fill: Style);
}

impl Draw for Canvas {
    fn draw_hline(&mut self, x: i32, y: i32, width: u16, ch: char, style: Style) {
        for i in 0..i32::from(width) {
            self.set(x + i, y, ch, style);
        }
    }

    fn draw_vline(&mut self, x: i32, y: i32, height: u16, ch: char, style: Style) {
        for i in 0..i32::from(height) {
            self.set(x, y + i, ch, style);
        }
    }

    fn print_text_clipped(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: Style,
        max_x: i32,
    ) -> i32 {
        let mut cx = x;
        for ch in text.chars() {
            let width = char_width(ch) as i32;
            if width == 0 {
                continue;
            }
            if cx + width > max_x {
                break;
            }
            self.set(cx, y, ch, style);
            cx += width;
        }
        cx
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, style: Style) {
        if rect.is_empty() {
            return;
        }
        let left = i32::from(rect.x);
        let top = i32::from(rect.y);
        let right = i32::from(rect.right()) - 1;
        let bottom = i32::from(rect.bottom()) - 1;

        self.draw_hline(left, top, rect.width, chars.horizontal, style);
        self.draw_hline(left, bottom, rect.width, chars.horizontal, style);
        if rect.height > 2 {
            self.draw_vline(left, top + 1, rect.height - 2, chars.vertical, style);
            self.draw_vline(right, top + 1, rect.height - 2, chars.vertical, style);
        }

        self.set(left, top, chars.top_left, style);
        self.set(right, top, chars.top_right, style);
        self.set(left, bottom, chars.bottom_left, style);
        self.set(right, bottom, chars.bottom_right, style);
    }

    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border: Style, fill: Style) {
        if rect.width > 2 && rect.height > 2 {
            self.fill(
                Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2),
                ' ',
                fill,
            );
        }
        self.draw_border(rect, chars, border);
    }
}

#![forbid(unsafe_code)]

//! Per-rune terminal display width.
//!
//! Every layout decision in folio is measured in terminal columns, never
//! bytes or `char` counts. A rune is 0, 1, or 2 columns wide:
//!
//! - 0: control characters, combining marks, zero-width joiners and
//!   other invisible format characters
//! - 2: East Asian wide/fullwidth runes (CJK, Hangul, fullwidth forms)
//!   and the emoji blocks
//! - 1: everything else, including all printable ASCII
//!
//! String width is the plain sum of rune widths, so it is additive over
//! concatenation.

use unicode_width::UnicodeWidthChar;

#[inline]
fn is_control(c: char) -> bool {
    matches!(c as u32, 0x0000..=0x001F | 0x007F..=0x009F)
}

#[inline]
fn is_zero_width_codepoint(c: char) -> bool {
    let u = c as u32;
    matches!(u, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF)
        || matches!(u, 0xFE20..=0xFE2F)
        || matches!(u, 0xFE00..=0xFE0F | 0xE0100..=0xE01EF)
        || matches!(
            u,
            0x00AD | 0x034F | 0x180E | 0x200B | 0x200C | 0x200D | 0x200E | 0x200F | 0x2060 | 0xFEFF
        )
        || matches!(u, 0x202A..=0x202E | 0x2066..=0x2069 | 0x206A..=0x206F)
}

#[inline]
fn is_emoji(c: char) -> bool {
    let u = c as u32;
    matches!(
        u,
        0x1F000..=0x1FAFF | 0x2300..=0x23FF | 0x2600..=0x27BF | 0x2B00..=0x2BFF
    ) && u != 0x2764
}

/// Display width of a single rune: 0, 1, or 2 columns.
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    if c.is_ascii() {
        return if is_control(c) { 0 } else { 1 };
    }
    if is_control(c) || is_zero_width_codepoint(c) {
        return 0;
    }
    if is_emoji(c) {
        return 2;
    }
    match c.width() {
        Some(0) => 0,
        Some(2) => 2,
        _ => 1,
    }
}

/// Display width of a string: the sum of its rune widths.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return text.len();
    }
    text.chars().map(char_width).sum()
}

#![forbid(unsafe_code)]

//! Display width of runes and strings.
//!
//! | input | width |
//! |-------|-------|
//! | control characters, combining marks, ZWJ | 0 |
//! | CJK, Hangul, fullwidth forms, emoji | 2 |
//! | everything else | 1 |

pub use folio_render::text_width::char_width;

/// Display width of a string: the sum of [`char_width`] over its runes.
#[inline]
#[must_use]
pub fn string_width(text: &str) -> usize {
    folio_render::text_width::display_width(text)
}

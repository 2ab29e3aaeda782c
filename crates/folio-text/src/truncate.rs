#![forbid(unsafe_code)]

//! Width-aware truncation.
//!
//! Truncation never splits a rune: a wide rune that would straddle the
//! limit is dropped entirely, so results may be one column short.

use crate::width::{char_width, string_width};

/// Longest prefix of `text` at most `max_width` columns wide.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        let w = char_width(c);
        if used + w > max_width {
            break;
        }
        used += w;
        end = i + c.len_utf8();
    }
    text[..end].to_string()
}

/// Truncate to `max_width`, ending with `ellipsis` when anything was cut.
///
/// If the ellipsis itself does not fit, the text is cut without one.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize, ellipsis: &str) -> String {
    if string_width(text) <= max_width {
        return text.to_string();
    }
    let ellipsis_width = string_width(ellipsis);
    if ellipsis_width > max_width {
        return truncate_to_width(text, max_width);
    }
    let mut out = truncate_to_width(text, max_width - ellipsis_width);
    out.push_str(ellipsis);
    out
}

/// Truncate to `max_width`, reserving three columns for `"..."` when the
/// text is actually cut and the width leaves room for more than the dots.
///
/// ```
/// use folio_text::truncate;
///
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 8), "hello");
/// assert_eq!(truncate("hello", 3), "hel");
/// ```
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return truncate_to_width(text, max_width);
    }
    truncate_with_ellipsis(text, max_width, "...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_by_columns() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wide_rune_is_not_split() {
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("a日", 2), "a");
    }

    #[test]
    fn zero_width_marks_stay_attached() {
        assert_eq!(truncate_to_width("e\u{301}x", 1), "e\u{301}");
    }

    #[test]
    fn single_rune_ellipsis() {
        assert_eq!(truncate_with_ellipsis("longer", 4, "…"), "lon…");
        assert_eq!(truncate_with_ellipsis("abc", 3, "…"), "abc");
        assert_eq!(truncate_with_ellipsis("日本語", 4, "…"), "日…");
    }

    #[test]
    fn ellipsis_wider_than_limit() {
        assert_eq!(truncate_with_ellipsis("abcdef", 2, "..."), "ab");
    }

    #[test]
    fn three_dot_reserve() {
        assert_eq!(truncate("abcdefgh", 6), "abc...");
        assert_eq!(truncate("abcdefgh", 4), "a...");
        assert_eq!(truncate("abcdefgh", 2), "ab");
    }
}

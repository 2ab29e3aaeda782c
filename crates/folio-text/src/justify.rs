#![forbid(unsafe_code)]

//! Full justification.
//!
//! Extra columns are spread across the gaps between words, earlier gaps
//! taking the remainder. Lines that cannot be justified cleanly fall back
//! to left alignment, padded on the right to the target width:
//!
//! - fewer than two words
//! - words plus single spaces already exceed the width
//! - three or more words whose widest gap would exceed
//!   [`MAX_GAP`] columns

use crate::width::string_width;
use crate::wrap::layout;

/// Widest gap a line with several gaps may be stretched to.
pub const MAX_GAP: usize = 3;

/// Gap widths that justify words of `words_width` total columns across
/// `width`, or `None` when the line should stay left-aligned.
pub(crate) fn gap_widths(words_width: usize, word_count: usize, width: usize) -> Option<Vec<usize>> {
    if word_count <= 1 {
        return None;
    }
    let gaps = word_count - 1;
    if words_width + gaps > width {
        return None;
    }
    let space = width - words_width;
    let base = space / gaps;
    let remainder = space % gaps;
    let widest = base + usize::from(remainder > 0);
    if gaps >= 2 && widest > MAX_GAP {
        return None;
    }
    Some(
        (0..gaps)
            .map(|i| base + usize::from(i < remainder))
            .collect(),
    )
}

/// Left-aligned fallback: `line` padded with spaces to `width`.
///
/// Lines already at least `width` wide are returned unchanged.
pub(crate) fn pad_right(line: &str, width: usize) -> String {
    let w = string_width(line);
    let mut out = line.to_string();
    if w < width {
        out.extend(std::iter::repeat_n(' ', width - w));
    }
    out
}

/// Justify one line to exactly `width` columns.
///
/// ```
/// use folio_text::justify_line;
///
/// assert_eq!(justify_line("hello world", 15), "hello     world");
/// assert_eq!(justify_line("one two three", 16), "one   two  three");
/// assert_eq!(justify_line("alone", 8), "alone   ");
/// ```
#[must_use]
pub fn justify_line(line: &str, width: usize) -> String {
    let words: Vec<&str> = line.split_whitespace().collect();
    let words_width: usize = words.iter().map(|w| string_width(w)).sum();
    let Some(gaps) = gap_widths(words_width, words.len(), width) else {
        return pad_right(line, width);
    };
    let mut out = String::with_capacity(width);
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.extend(std::iter::repeat_n(' ', gaps[i - 1]));
        }
        out.push_str(word);
    }
    out
}

/// Wrap `text` and justify every line except the last of each
/// newline-delimited group.
#[must_use]
pub fn wrap_and_justify(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    for group in layout(&chars, width) {
        let last = group.len().saturating_sub(1);
        for (i, line) in group.iter().enumerate() {
            let plain = line.text(&chars);
            if i < last {
                out.push(justify_line(&plain, width));
            } else {
                out.push(plain);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_words_always_justify() {
        assert_eq!(justify_line("hello world", 15), "hello     world");
        assert_eq!(justify_line("a b", 12), "a          b");
    }

    #[test]
    fn remainder_goes_to_early_gaps() {
        assert_eq!(justify_line("one two three", 16), "one   two  three");
        assert_eq!(justify_line("a b c d", 10), "a  b  c  d");
        assert_eq!(justify_line("a b c d", 11), "a   b  c  d");
    }

    #[test]
    fn single_word_is_left_aligned() {
        assert_eq!(justify_line("word", 8), "word    ");
        assert_eq!(justify_line("", 3), "   ");
    }

    #[test]
    fn rivers_fall_back_to_left_alignment() {
        // Two gaps of 4+ columns would be needed.
        assert_eq!(justify_line("a b c", 12), "a b c       ");
    }

    #[test]
    fn overflowing_line_is_unchanged() {
        assert_eq!(justify_line("hello world", 10), "hello world");
    }

    #[test]
    fn justified_width_is_exact() {
        let line = justify_line("lorem ipsum dolor sit", 24);
        assert_eq!(string_width(&line), 24);
        assert!(line.starts_with("lorem") && line.ends_with("sit"));
    }

    #[test]
    fn wide_words_measured_in_columns() {
        assert_eq!(justify_line("日本 語", 8), "日本  語");
    }

    #[test]
    fn last_line_of_each_group_is_ragged() {
        let lines = wrap_and_justify("aaa bb cc dd\nee ff gg", 8);
        assert_eq!(lines, vec!["aaa   bb", "cc dd", "ee ff gg"]);
    }

    #[test]
    fn wrap_and_justify_zero_width() {
        assert!(wrap_and_justify("text", 0).is_empty());
    }
}

#![forbid(unsafe_code)]

//! Greedy word wrapping.
//!
//! Input is split on `'\n'` into groups; each group wraps on its own and
//! blank groups survive as empty lines. Within a group, whitespace runs
//! separate words and collapse to a single space in the output. A word
//! wider than the target width is hard-broken rune by rune; its last
//! piece continues the line like any other word.
//!
//! The wrapper works on rune slices and reports lines as word ranges into
//! the slice, so styled text can be laid out by the same code that lays
//! out plain strings (see [`crate::span::wrap_styled`]).

use std::mem;
use std::ops::Range;

use tracing::trace;

use crate::width::char_width;

/// One output line: word (or word piece) ranges into the source runes.
///
/// Consecutive words are separated by exactly one space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WrappedLine {
    pub(crate) words: Vec<Range<usize>>,
    pub(crate) width: usize,
}

impl WrappedLine {
    pub(crate) fn text(&self, chars: &[char]) -> String {
        let mut out = String::with_capacity(self.width);
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.extend(&chars[word.clone()]);
        }
        out
    }

    pub(crate) fn word_widths(&self, chars: &[char]) -> Vec<usize> {
        self.words
            .iter()
            .map(|w| chars[w.clone()].iter().copied().map(char_width).sum())
            .collect()
    }
}

/// Wrap `chars` into newline-delimited groups of lines.
///
/// Width 0 yields no groups at all.
pub(crate) fn layout(chars: &[char], width: usize) -> Vec<Vec<WrappedLine>> {
    if width == 0 {
        return Vec::new();
    }
    let mut groups = Vec::new();
    let mut start = 0;
    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            groups.push(layout_group(chars, start..i, width));
            start = i + 1;
        }
    }
    groups.push(layout_group(chars, start..chars.len(), width));
    groups
}

fn layout_group(chars: &[char], range: Range<usize>, width: usize) -> Vec<WrappedLine> {
    let mut lines = Vec::new();
    let mut cur = WrappedLine::default();
    let mut i = range.start;
    while i < range.end {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let mut word_width = 0;
        while i < range.end && !chars[i].is_whitespace() {
            word_width += char_width(chars[i]);
            i += 1;
        }
        place_word(chars, start..i, word_width, width, &mut cur, &mut lines);
    }
    if !cur.words.is_empty() || lines.is_empty() {
        lines.push(cur);
    }
    lines
}

fn place_word(
    chars: &[char],
    word: Range<usize>,
    word_width: usize,
    width: usize,
    cur: &mut WrappedLine,
    lines: &mut Vec<WrappedLine>,
) {
    if !cur.words.is_empty() {
        if cur.width + 1 + word_width <= width {
            cur.words.push(word);
            cur.width += 1 + word_width;
            return;
        }
        lines.push(mem::take(cur));
    }

    if word_width <= width {
        cur.words.push(word);
        cur.width = word_width;
        return;
    }

    trace!(word_width, width, "hard-breaking long word");
    for piece in break_word_unicode(chars, word, width) {
        if !cur.words.is_empty() {
            lines.push(mem::take(cur));
        }
        cur.width = chars[piece.clone()].iter().copied().map(char_width).sum();
        cur.words.push(piece);
    }
}

/// Split a word into pieces no wider than `width`, never inside a rune.
///
/// A single rune wider than `width` becomes a piece of its own.
fn break_word_unicode(chars: &[char], word: Range<usize>, width: usize) -> Vec<Range<usize>> {
    let mut pieces = Vec::new();
    let mut piece_start = word.start;
    let mut piece_width = 0;
    for k in word.clone() {
        let w = char_width(chars[k]);
        if piece_width + w > width && k > piece_start {
            pieces.push(piece_start..k);
            piece_start = k;
            piece_width = 0;
        }
        piece_width += w;
    }
    if piece_start < word.end {
        pieces.push(piece_start..word.end);
    }
    pieces
}

/// Wrap `text` to `width` display columns.
///
/// Explicit newlines start new groups; blank groups produce empty lines.
/// Width 0 produces no lines.
///
/// ```
/// use folio_text::wrap_text;
///
/// assert_eq!(wrap_text("the quick brown fox", 10), vec!["the quick", "brown fox"]);
/// assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    layout(&chars, width)
        .into_iter()
        .flatten()
        .map(|line| line.text(&chars))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::width::string_width;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn lines_fit_width(text in "\\PC{0,80}", width in 1usize..40) {
            for line in wrap_text(&text, width) {
                let w = string_width(&line);
                prop_assert!(
                    w <= width || line.chars().count() == 1,
                    "line {:?} has width {} > {}", line, w, width
                );
            }
        }

        #[test]
        fn narrow_runes_always_fit(text in "[a-z \\n]{0,80}", width in 1usize..20) {
            for line in wrap_text(&text, width) {
                prop_assert!(string_width(&line) <= width);
            }
        }

        #[test]
        fn no_content_is_lost(words in prop::collection::vec("[a-z]{1,12}", 0..20), width in 1usize..30) {
            let text = words.join(" ");
            let rejoined: String = wrap_text(&text, width).concat();
            let original: String = words.concat();
            prop_assert_eq!(rejoined.replace(' ', ""), original);
        }
    }
}

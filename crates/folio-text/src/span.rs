#![forbid(unsafe_code)]

//! Styled spans and their reflow across wrapped, justified lines.
//!
//! A paragraph arrives as a list of [`Span`] fragments: runs of text
//! sharing one style and one hyperlink target. Reflowing must keep every
//! surviving rune attached to the fragment it came from, while spaces the
//! justifier inserts carry no style at all.
//!
//! Two routines produce the same cells:
//!
//! - [`wrap_styled`] lays out the flattened runes with each rune still
//!   tagged by its fragment, so attribution is never lost.
//! - [`realign_spans`] wraps the plain text first and then re-attaches
//!   styles by walking output and source runes side by side. It is kept
//!   for callers that already hold justified strings and as a reference
//!   the tagged layout is checked against.
//!
//! The two differ only for source text containing runs of several
//! spaces, where the matcher attributes every space of a justified gap
//! that happens to line up with a source space.

use folio_render::Style;

use crate::justify::{gap_widths, wrap_and_justify};
use crate::width::string_width;
use crate::wrap::{layout, wrap_text};

/// A run of text sharing one style and hyperlink target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
    pub href: Option<String>,
}

/// One output line: spans whose texts concatenate to the line.
pub type StyledLine = Vec<Span>;

impl Span {
    /// A span with a style and no link.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            href: None,
        }
    }

    /// An unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::default())
    }

    /// A hyperlinked span.
    pub fn link(text: impl Into<String>, style: Style, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
            href: Some(href.into()),
        }
    }

    /// Display width of the text.
    #[inline]
    pub fn width(&self) -> usize {
        string_width(&self.text)
    }

    /// Same style and same link target.
    #[inline]
    pub fn same_attrs(&self, other: &Span) -> bool {
        self.style == other.style && self.href == other.href
    }

    fn empty_like(source: &Span) -> Self {
        Self {
            text: String::new(),
            style: source.style,
            href: source.href.clone(),
        }
    }
}

/// Flatten fragments into runes plus, per rune, the index of its fragment.
fn flatten(fragments: &[Span]) -> (Vec<char>, Vec<usize>) {
    let mut chars = Vec::new();
    let mut owners = Vec::new();
    for (i, frag) in fragments.iter().enumerate() {
        for c in frag.text.chars() {
            chars.push(c);
            owners.push(i);
        }
    }
    (chars, owners)
}

static UNSTYLED: Span = Span {
    text: String::new(),
    style: Style::PLAIN,
    href: None,
};

/// Append one rune, extending the last span when attributes match.
fn push_rune(line: &mut StyledLine, c: char, source: &Span) {
    match line.last_mut() {
        Some(last) if last.same_attrs(source) => last.text.push(c),
        _ => {
            let mut span = Span::empty_like(source);
            span.text.push(c);
            line.push(span);
        }
    }
}

/// Lay out tagged runes: wrap, optionally justify, and emit spans.
///
/// Every rune keeps its fragment's style and link. Of the spaces in a
/// gap between two words, the first takes the attributes of the source
/// space it replaces (when the source separator was a plain `' '`);
/// justification padding is unstyled. Lines that fall back to left
/// alignment are padded to `width` the same way.
///
/// The last line of each newline-delimited group is never justified.
/// Width 0 yields no lines.
#[must_use]
pub fn wrap_styled(fragments: &[Span], width: usize, justify: bool) -> Vec<StyledLine> {
    let (chars, owners) = flatten(fragments);
    let separator = |after: usize| separator_source(fragments, &chars, &owners, after);

    let mut out = Vec::new();
    for group in layout(&chars, width) {
        let last = group.len().saturating_sub(1);
        for (i, line) in group.iter().enumerate() {
            let single_gaps = vec![1; line.words.len().saturating_sub(1)];
            let (gaps, pad) = if justify && i < last {
                let widths = line.word_widths(&chars);
                match gap_widths(widths.iter().sum(), widths.len(), width) {
                    Some(gaps) => (gaps, 0),
                    None => (single_gaps, width.saturating_sub(line.width)),
                }
            } else {
                (single_gaps, 0)
            };

            let mut styled = StyledLine::new();
            let mut prev_end = None;
            for (k, word) in line.words.iter().enumerate() {
                if let Some(end) = prev_end {
                    push_gap(&mut styled, separator(end), gaps[k - 1]);
                }
                for idx in word.clone() {
                    push_rune(&mut styled, chars[idx], &fragments[owners[idx]]);
                }
                prev_end = Some(word.end);
            }
            if pad > 0 {
                let first = match prev_end {
                    Some(end) => separator(end),
                    None => &UNSTYLED,
                };
                push_gap(&mut styled, first, pad);
            }
            out.push(styled);
        }
    }
    out
}

/// Fragment whose attributes the first space of a gap inherits: the one
/// owning the source separator, when that separator is a plain space.
fn separator_source<'a>(
    fragments: &'a [Span],
    chars: &[char],
    owners: &[usize],
    after: usize,
) -> &'a Span {
    if chars.get(after) == Some(&' ') {
        &fragments[owners[after]]
    } else {
        &UNSTYLED
    }
}

fn push_gap(line: &mut StyledLine, first: &Span, width: usize) {
    if width == 0 {
        return;
    }
    push_rune(line, ' ', first);
    for _ in 1..width {
        push_rune(line, ' ', &UNSTYLED);
    }
}

/// Re-attach fragment styles to text wrapped (and optionally justified)
/// as a plain string.
///
/// Output and source runes are walked with two cursors; the source cursor
/// never rewinds across lines. A rune equal to the current source rune is
/// attributed to that rune's fragment, extending the current span while
/// runes keep matching with the same attributes. A space that does not
/// match was inserted by the justifier and is emitted unstyled. Any other
/// mismatch means the source rune was whitespace absorbed by wrapping and
/// is skipped. Output left over once the source is exhausted becomes one
/// unstyled span.
#[must_use]
pub fn realign_spans(fragments: &[Span], width: usize, justify: bool) -> Vec<StyledLine> {
    let (orig, owners) = flatten(fragments);
    let flat: String = orig.iter().collect();
    let lines = if justify {
        wrap_and_justify(&flat, width)
    } else {
        wrap_text(&flat, width)
    };

    let mut orig_pos = 0;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        let line: Vec<char> = line.chars().collect();
        let mut styled = StyledLine::new();
        let mut j = 0;
        while j < line.len() {
            if orig_pos >= orig.len() {
                let rest: String = line[j..].iter().collect();
                styled.push(Span::plain(rest));
                break;
            }
            if line[j] == orig[orig_pos] {
                let source = &fragments[owners[orig_pos]];
                let mut span = Span::empty_like(source);
                while j < line.len()
                    && orig_pos < orig.len()
                    && line[j] == orig[orig_pos]
                    && fragments[owners[orig_pos]].same_attrs(source)
                {
                    span.text.push(line[j]);
                    j += 1;
                    orig_pos += 1;
                }
                styled.push(span);
            } else if line[j] == ' ' {
                match styled.last_mut() {
                    Some(last) if last.same_attrs(&UNSTYLED) && last.text.ends_with(' ') => {
                        last.text.push(' ');
                    }
                    _ => styled.push(Span::plain(" ")),
                }
                j += 1;
            } else {
                orig_pos += 1;
            }
        }
        out.push(styled);
    }
    out
}

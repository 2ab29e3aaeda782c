#![forbid(unsafe_code)]

//! Jumps between recorded paragraphs and headings.

use crate::positions::Heading;

/// First paragraph start strictly below row `y`.
///
/// `starts` must be ascending, as recorded by a render.
pub fn next_paragraph(starts: &[usize], y: usize) -> Option<usize> {
    let idx = starts.partition_point(|&s| s <= y);
    starts.get(idx).copied()
}

/// Last paragraph start strictly above row `y`.
pub fn prev_paragraph(starts: &[usize], y: usize) -> Option<usize> {
    let idx = starts.partition_point(|&s| s < y);
    idx.checked_sub(1).map(|i| starts[i])
}

/// The heading whose section contains row `y`: the last one starting at
/// or above it.
pub fn heading_at(headings: &[Heading], y: usize) -> Option<&Heading> {
    let idx = headings.partition_point(|h| h.y <= y);
    idx.checked_sub(1).map(|i| &headings[i])
}

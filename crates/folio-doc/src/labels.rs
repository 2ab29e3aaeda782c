#![forbid(unsafe_code)]

//! Home-row jump labels.
//!
//! Up to nine targets get one-letter labels; more get two letters each
//! so no label is a prefix of another.

/// Label alphabet, home row first.
pub const LABEL_ALPHABET: &str = "asdfghjkl";

/// Most labels [`generate_labels`] can produce.
pub const MAX_LABELS: usize = 81;

/// Labels for `n` targets.
///
/// ```
/// use folio_doc::generate_labels;
///
/// assert_eq!(generate_labels(3), ["a", "s", "d"]);
/// assert_eq!(generate_labels(10)[..3], ["aa", "as", "ad"]);
/// ```
///
/// Beyond [`MAX_LABELS`] targets only the first 81 get labels.
pub fn generate_labels(n: usize) -> Vec<String> {
    let alphabet: Vec<char> = LABEL_ALPHABET.chars().collect();
    if n <= alphabet.len() {
        return alphabet.iter().take(n).map(char::to_string).collect();
    }
    alphabet
        .iter()
        .flat_map(|&a| alphabet.iter().map(move |&b| [a, b].iter().collect()))
        .take(n.min(MAX_LABELS))
        .collect()
}

/// Split `label` into its typed prefix and untyped rest.
///
/// Returns `None` when `typed` is not a prefix of `label`.
pub fn split_label<'a>(label: &'a str, typed: &str) -> Option<(&'a str, &'a str)> {
    label
        .strip_prefix(typed)
        .map(|rest| (&label[..typed.len()], rest))
}

/// Whether `label` is still reachable after typing `typed`.
#[inline]
pub fn matches_prefix(label: &str, typed: &str) -> bool {
    label.starts_with(typed)
}

/// Index of the label equal to `typed`, if typing is complete.
pub fn resolve_label(labels: &[String], typed: &str) -> Option<usize> {
    if typed.is_empty() {
        return None;
    }
    labels.iter().position(|l| l == typed)
}

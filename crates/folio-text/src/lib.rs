#![forbid(unsafe_code)]

//! Text layout for folio.
//!
//! Everything here measures in terminal display columns
//! ([`string_width`]), never bytes or rune counts.
//!
//! - [`wrap`]: greedy word wrapping with hard breaks for long words
//! - [`justify`]: full justification with left-aligned fallback
//! - [`truncate`]: width-aware truncation with ellipsis
//! - [`span`]: styled fragments and their reflow across wrapped lines

pub mod justify;
pub mod span;
pub mod truncate;
pub mod width;
pub mod wrap;

pub use justify::{justify_line, wrap_and_justify};
pub use span::{Span, StyledLine, realign_spans, wrap_styled};
pub use truncate::{truncate, truncate_to_width, truncate_with_ellipsis};
pub use width::{char_width, string_width};
pub use wrap::wrap_text;

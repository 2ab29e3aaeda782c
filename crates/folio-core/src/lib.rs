#![forbid(unsafe_code)]

//! Shared primitives for folio: geometry and terminal capabilities.

pub mod geometry;
pub mod terminal_capabilities;

pub use geometry::Rect;
pub use terminal_capabilities::TerminalCapabilities;

/// Query the current terminal size as `(width, height)`.
///
/// Returns `None` when stdout is not attached to a terminal.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn terminal_size() -> Option<(u16, u16)> {
    crossterm::terminal::size().ok()
}

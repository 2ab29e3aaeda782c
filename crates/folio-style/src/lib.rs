#![forbid(unsafe_code)]

//! Themes: semantic style slots passed explicitly to the renderer and
//! overlays.

pub mod theme;

pub use theme::{Palette, Theme, themes};

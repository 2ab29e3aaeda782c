#![forbid(unsafe_code)]

//! Render kernel: styles, cells, the canvas grid, box drawing, and ANSI
//! presentation.

pub mod ansi;
pub mod canvas;
pub mod cell;
pub mod color;
pub mod drawing;
pub mod link_registry;
pub mod presenter;
pub mod style;
pub mod text_width;

pub use canvas::Canvas;
pub use cell::{Cell, CellContent};
pub use color::{Ansi16, Color, ColorProfile, Rgb};
pub use drawing::{BorderChars, Draw};
pub use link_registry::LinkRegistry;
pub use presenter::Presenter;
pub use style::{Style, StyleFlags};
pub use text_width::{char_width, display_width};

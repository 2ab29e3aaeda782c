#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! Re-exports the document model, renderer and overlays together with the
//! canvas, theme and text primitives they are built on, plus a prelude
//! for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::{Rect, TerminalCapabilities, terminal_size};

// --- Render re-exports -----------------------------------------------------

pub use folio_render::{
    Ansi16, Canvas, Cell, Color, ColorProfile, LinkRegistry, Presenter, Rgb, Style, StyleFlags,
};

// --- Style re-exports ------------------------------------------------------

pub use folio_style::{Palette, Theme, themes};

// --- Text re-exports -------------------------------------------------------

pub use folio_text::{Span, StyledLine, string_width, wrap_and_justify, wrap_styled, wrap_text};

// --- Document re-exports ---------------------------------------------------

pub use folio_doc::{
    BufferEntry, Frame, Heading, Input, Link, Node, NodeKind, RenderOptions, Renderer,
    content_height, generate_labels, resolve_label,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for folio applications.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading a document or writing a frame.
    Io(std::io::Error),
    /// The document could not be loaded.
    Document(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Document(msg) => write!(f, "invalid document: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Document(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for folio APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Canvas, Error, Node, NodeKind, RenderOptions, Renderer, Result, Style,
        TerminalCapabilities, Theme,
    };

    pub use crate::{core, doc, render, style, text};
}

pub use folio_core as core;
pub use folio_doc as doc;
pub use folio_render as render;
pub use folio_style as style;
pub use folio_text as text;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_errors_convert_and_chain() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(err.to_string(), "pipe closed");
        assert!(err.source().is_some());
    }

    #[test]
    fn document_error_names_the_problem() {
        let err = Error::Document("missing field `kind`".into());
        assert_eq!(err.to_string(), "invalid document: missing field `kind`");
        assert!(err.source().is_none());
    }

    #[test]
    fn prelude_renders_a_document() {
        use crate::prelude::{Node, Renderer, Theme};
        let doc = Node::document(vec![Node::paragraph(vec![Node::text("hello")])]);
        let mut renderer = Renderer::new(20, 4).with_theme(Theme::default());
        renderer.render(&doc, 0);
        assert_eq!(renderer.canvas().row_text(0).trim(), "hello");
    }
}

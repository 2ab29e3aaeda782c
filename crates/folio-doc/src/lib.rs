#![forbid(unsafe_code)]

//! Document model, layout and overlays for folio.
//!
//! A parsed [`Node`] tree goes in; a [`Renderer`] lays it out on its
//! canvas and records where links, inputs, headings and paragraphs
//! landed. Overlay functions draw tables of contents, link indexes and
//! jump labels on top of a rendered page.
//!
//! ```
//! use folio_doc::{Node, Renderer};
//!
//! let doc = Node::document(vec![
//!     Node::heading(1, "Hello"),
//!     Node::paragraph(vec![Node::text("A short paragraph.")]),
//! ]);
//! let mut renderer = Renderer::new(40, 10);
//! renderer.render(&doc, 0);
//! assert_eq!(renderer.headings()[0].text, "Hello");
//! assert_eq!(renderer.content_height(&doc), renderer.frame().content_height);
//! ```

pub mod extract;
pub mod height;
pub mod labels;
pub mod navigation;
pub mod node;
pub mod options;
pub mod overlay;
mod plan;
pub mod positions;
pub mod renderer;
pub mod table;
mod walk;

pub use extract::{extract_spans, extract_spans_from};
pub use height::{clamp_scroll, content_height, max_scroll};
pub use labels::{LABEL_ALPHABET, MAX_LABELS, generate_labels, matches_prefix, resolve_label};
pub use node::{Node, NodeKind};
pub use options::RenderOptions;
pub use overlay::{BufferEntry, OverlayRow};
pub use positions::{FormContext, Heading, Input, Link, is_image_href};
pub use renderer::{Frame, Renderer};
pub use table::{TableLayout, table_height};

#![forbid(unsafe_code)]

//! Content height and scroll range.
//!
//! [`content_height`] walks the document with the same planners as a
//! render but draws nothing, so it returns exactly the number of rows a
//! render advances.

use folio_style::Theme;

use crate::node::Node;
use crate::options::RenderOptions;
use crate::walk::{Measure, Walker};

/// Rows `doc` occupies on a canvas `width` cells wide.
pub fn content_height(doc: &Node, width: u16, options: &RenderOptions, theme: &Theme) -> usize {
    let (_, content_width) = options.geometry(width);
    let mut walker = Walker::new(Measure, theme, options, content_width);
    walker.walk(doc);
    walker.y()
}

/// Largest scroll offset that still fills the viewport.
#[inline]
pub fn max_scroll(content_height: usize, viewport_height: usize) -> usize {
    content_height.saturating_sub(viewport_height)
}

/// `scroll_y` limited to `[0, max_scroll]`.
#[inline]
pub fn clamp_scroll(scroll_y: usize, content_height: usize, viewport_height: usize) -> usize {
    scroll_y.min(max_scroll(content_height, viewport_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_range() {
        assert_eq!(max_scroll(100, 30), 70);
        assert_eq!(max_scroll(10, 30), 0);
        assert_eq!(clamp_scroll(90, 100, 30), 70);
        assert_eq!(clamp_scroll(5, 100, 30), 5);
        assert_eq!(clamp_scroll(5, 10, 30), 0);
    }

    #[test]
    fn empty_document_has_no_height() {
        let doc = Node::document(vec![]);
        assert_eq!(content_height(&doc, 80, &RenderOptions::default(), &Theme::default()), 0);
    }

    #[test]
    fn height_follows_width() {
        let doc = Node::paragraph(vec![Node::text("word ".repeat(40))]);
        let opts = RenderOptions::default();
        let theme = Theme::default();
        let wide = content_height(&doc, 84, &opts, &theme);
        let narrow = content_height(&doc, 24, &opts, &theme);
        assert!(narrow > wide);
        assert_eq!(wide, 4);
    }
}

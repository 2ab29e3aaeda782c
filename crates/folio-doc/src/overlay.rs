#![forbid(unsafe_code)]

//! Overlays drawn on top of a rendered page.
//!
//! Two shapes exist:
//!
//! - **Badges**: a jump label drawn over each visible link or input.
//! - **List boxes**: a centered, bordered list (table of contents, link
//!   index, navigation, open buffers) over a dimmed page, one labeled row
//!   per item, scrolled by the caller.
//!
//! In both, the typed part of a label uses `label_typed` and the rest
//! uses `label_rest`, so the next key to press stands out.

use folio_core::Rect;
use folio_render::{BorderChars, Canvas, Draw, Style};
use folio_style::Theme;
use folio_text::{string_width, truncate_to_width, truncate_with_ellipsis};
use tracing::debug_span;

use crate::labels::split_label;
use crate::positions::{Heading, Input, Link};

/// An open document, for the buffer list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEntry {
    pub title: String,
    pub url: String,
    pub active: bool,
}

/// One row of a list overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayRow {
    pub label: String,
    pub text: String,
    /// Right-aligned secondary text.
    pub detail: String,
    pub indent: usize,
}

/// Smallest canvas a list box is drawn on.
const MIN_BOX_WIDTH: u16 = 12;
const MIN_BOX_HEIGHT: u16 = 3;
/// Cells between the box and the canvas edge.
const BOX_MARGIN: u16 = 2;
/// Narrowest list box interior.
const MIN_CONTENT_WIDTH: usize = 16;

/// Draw a label with its typed prefix highlighted. Returns columns used.
fn draw_label(canvas: &mut Canvas, x: i32, y: i32, label: &str, typed: &str, theme: &Theme) -> i32 {
    let (done, rest) = split_label(label, typed).unwrap_or(("", label));
    let mut used = canvas.write_str(x, y, done, theme.label_typed);
    used += canvas.write_str(x + used as i32, y, rest, theme.label_rest);
    used as i32
}

/// Jump labels over each visible link.
///
/// `labels[i]` belongs to `links[i]`. Links whose label no longer matches
/// `typed` get no badge.
pub fn render_link_labels(
    canvas: &mut Canvas,
    theme: &Theme,
    links: &[&Link],
    labels: &[String],
    typed: &str,
    scroll_y: usize,
) {
    let _span = debug_span!("overlay_render", overlay = "link_labels", count = links.len()).entered();
    for (link, label) in links.iter().zip(labels) {
        draw_badge(canvas, theme, link.x, link.screen_y(scroll_y), label, typed);
    }
}

/// Jump labels over each visible input field.
pub fn render_input_labels(
    canvas: &mut Canvas,
    theme: &Theme,
    inputs: &[&Input],
    labels: &[String],
    typed: &str,
    scroll_y: usize,
) {
    let _span =
        debug_span!("overlay_render", overlay = "input_labels", count = inputs.len()).entered();
    for (input, label) in inputs.iter().zip(labels) {
        draw_badge(canvas, theme, input.x, input.screen_y(scroll_y), label, typed);
    }
}

fn draw_badge(
    canvas: &mut Canvas,
    theme: &Theme,
    x: usize,
    row: Option<usize>,
    label: &str,
    typed: &str,
) {
    let Some(row) = row else { return };
    if split_label(label, typed).is_none() {
        return;
    }
    let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(row)) else {
        return;
    };
    draw_label(canvas, x, y, label, typed, theme);
}

/// A bordered list box centered over a dimmed canvas.
///
/// Shows as many rows as fit starting at `scroll` (clamped so the last
/// page is full), with `▲`/`▼` on the border when rows are hidden above
/// or below. Rows whose label does not match `typed` are dimmed.
pub fn render_list_overlay(
    canvas: &mut Canvas,
    theme: &Theme,
    title: &str,
    rows: &[OverlayRow],
    typed: &str,
    scroll: usize,
) {
    let _span = debug_span!("overlay_render", overlay = title, rows = rows.len()).entered();
    canvas.dim_all();
    let area = canvas.area();
    if area.width < MIN_BOX_WIDTH || area.height < MIN_BOX_HEIGHT {
        return;
    }

    let max_inner_height = usize::from(area.height.saturating_sub(2 + 2 * BOX_MARGIN)).max(1);
    let visible = rows.len().clamp(1, max_inner_height);
    let scroll = scroll.min(rows.len().saturating_sub(visible));

    let label_width = rows.iter().map(|r| string_width(&r.label)).max().unwrap_or(0);
    let content_width = rows
        .iter()
        .map(|r| {
            let detail = if r.detail.is_empty() {
                0
            } else {
                2 + string_width(&r.detail)
            };
            label_width + 1 + r.indent + string_width(&r.text) + detail
        })
        .max()
        .unwrap_or(0)
        .max(string_width(title) + 4)
        .max(MIN_CONTENT_WIDTH);
    let max_box_width = area.width.saturating_sub(2 * BOX_MARGIN).max(MIN_BOX_WIDTH);
    let box_width = u16::try_from(content_width + 4)
        .unwrap_or(u16::MAX)
        .min(max_box_width);
    let box_height = u16::try_from(visible + 2).unwrap_or(u16::MAX);
    let rect = area.centered(box_width, box_height);

    canvas.draw_box(rect, BorderChars::ROUNDED, theme.overlay_border, theme.overlay_text);
    let left = i32::from(rect.x);
    let top = i32::from(rect.y);
    let right = i32::from(rect.right()) - 1;
    let bottom = i32::from(rect.bottom()) - 1;

    let title = truncate_to_width(title, usize::from(rect.width.saturating_sub(6)));
    if !title.is_empty() {
        canvas.write_str(left + 2, top, &format!(" {title} "), theme.overlay_title);
    }
    if scroll > 0 {
        canvas.set(right - 2, top, '▲', theme.scroll_indicator);
    }
    if scroll + visible < rows.len() {
        canvas.set(right - 2, bottom, '▼', theme.scroll_indicator);
    }

    let inner_left = left + 2;
    let inner_right = right - 1;
    if rows.is_empty() {
        canvas.print_text_clipped(inner_left, top + 1, "(none)", theme.overlay_detail, inner_right);
        return;
    }
    for (i, row) in rows.iter().skip(scroll).take(visible).enumerate() {
        let y = top + 1 + i as i32;
        let matched = split_label(&row.label, typed).is_some();
        let text_style = if matched { theme.overlay_text } else { theme.dim };
        if matched {
            draw_label(canvas, inner_left, y, &row.label, typed, theme);
        } else {
            canvas.write_str(inner_left, y, &row.label, theme.dim);
        }
        let text_x = inner_left + (label_width + 1 + row.indent) as i32;
        let avail = usize::try_from(inner_right - text_x).unwrap_or(0);
        let text_width = string_width(&row.text);
        let detail_width = match string_width(&row.detail) {
            0 => 0,
            w if text_width + 2 + w <= avail => w,
            w => w.min(avail / 2),
        };
        let text_room = avail.saturating_sub(if detail_width > 0 { detail_width + 2 } else { 0 });
        let text = truncate_with_ellipsis(&row.text, text_room, "…");
        canvas.print_text_clipped(text_x, y, &text, text_style, inner_right);
        if detail_width > 0 {
            let detail = truncate_with_ellipsis(&row.detail, detail_width, "…");
            let x = inner_right - string_width(&detail) as i32;
            let style = if matched { theme.overlay_detail } else { theme.dim };
            canvas.print_text_clipped(x, y, &detail, style, inner_right);
        }
    }
}

/// One row per item. Items past the last label get an empty label.
fn labeled<T>(items: &[T], labels: &[String], row: impl Fn(&T) -> OverlayRow) -> Vec<OverlayRow> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| OverlayRow {
            label: labels.get(i).cloned().unwrap_or_default(),
            ..row(item)
        })
        .collect()
}

/// Table of contents, one row per heading, indented by level.
pub fn render_toc(
    canvas: &mut Canvas,
    theme: &Theme,
    headings: &[Heading],
    labels: &[String],
    typed: &str,
    scroll: usize,
) {
    let rows = labeled(headings, labels, |h| OverlayRow {
        text: match &h.number {
            Some(n) => format!("{n} {}", h.text),
            None => h.text.clone(),
        },
        indent: usize::from(h.level.saturating_sub(1)) * 2,
        ..OverlayRow::default()
    });
    render_list_overlay(canvas, theme, "Contents", &rows, typed, scroll);
}

fn link_row(link: &Link) -> OverlayRow {
    let text = if link.text.trim().is_empty() {
        link.href.clone()
    } else {
        link.text.clone()
    };
    OverlayRow {
        text,
        detail: link.href.clone(),
        ..OverlayRow::default()
    }
}

/// Site navigation links supplied by the caller.
pub fn render_navigation(
    canvas: &mut Canvas,
    theme: &Theme,
    links: &[Link],
    labels: &[String],
    typed: &str,
    scroll: usize,
) {
    let rows = labeled(links, labels, link_row);
    render_list_overlay(canvas, theme, "Navigation", &rows, typed, scroll);
}

/// Every link in the document.
pub fn render_link_index(
    canvas: &mut Canvas,
    theme: &Theme,
    links: &[Link],
    labels: &[String],
    typed: &str,
    scroll: usize,
) {
    let rows = labeled(links, labels, link_row);
    render_list_overlay(canvas, theme, "Links", &rows, typed, scroll);
}

/// Open documents, the active one marked.
pub fn render_buffer_list(
    canvas: &mut Canvas,
    theme: &Theme,
    buffers: &[BufferEntry],
    labels: &[String],
    typed: &str,
    scroll: usize,
) {
    let rows = labeled(buffers, labels, |b| OverlayRow {
        text: format!("{} {}", if b.active { '*' } else { ' ' }, b.title),
        detail: b.url.clone(),
        ..OverlayRow::default()
    });
    render_list_overlay(canvas, theme, "Buffers", &rows, typed, scroll);
}

/// Row-major text of a rectangle, for tests and debugging.
pub fn rect_text(canvas: &Canvas, rect: Rect) -> Vec<String> {
    (rect.y..rect.bottom())
        .map(|y| {
            (rect.x..rect.right())
                .filter_map(|x| canvas.get(i32::from(x), i32::from(y)).symbol())
                .collect()
        })
        .collect()
}

/// Style used for a label cell, given what has been typed.
pub fn label_style(theme: &Theme, label: &str, typed: &str, index: usize) -> Option<Style> {
    let (done, _) = split_label(label, typed)?;
    let done = done.chars().count();
    Some(if index < done {
        theme.label_typed
    } else {
        theme.label_rest
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::generate_labels;
    use folio_render::StyleFlags;

    fn link(text: &str, x: usize, y: usize) -> Link {
        Link {
            href: format!("/{text}"),
            text: text.into(),
            x,
            y,
            length: text.len(),
            is_image: false,
        }
    }

    #[test]
    fn badges_highlight_typed_prefix() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(20, 3);
        let links = [link("one", 2, 5), link("two", 8, 6)];
        let refs: Vec<&Link> = links.iter().collect();
        let labels = vec!["as".to_string(), "sd".to_string()];
        render_link_labels(&mut canvas, &theme, &refs, &labels, "a", 4);
        assert_eq!(canvas.get(2, 1).style, theme.label_typed);
        assert_eq!(canvas.get(3, 1).style, theme.label_rest);
        assert_eq!(canvas.row_text(1).trim(), "as");
        // "sd" does not match "a".
        assert_eq!(canvas.row_text(2).trim(), "");
    }

    #[test]
    fn badges_above_viewport_are_skipped() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(10, 2);
        let links = [link("x", 0, 1)];
        let refs: Vec<&Link> = links.iter().collect();
        render_link_labels(&mut canvas, &theme, &refs, &generate_labels(1), "", 3);
        assert_eq!(canvas.row_text(0).trim(), "");
    }

    #[test]
    fn list_box_is_centered_and_labeled() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(40, 12);
        let rows = vec![
            OverlayRow {
                label: "a".into(),
                text: "First".into(),
                ..OverlayRow::default()
            },
            OverlayRow {
                label: "s".into(),
                text: "Second".into(),
                ..OverlayRow::default()
            },
        ];
        render_list_overlay(&mut canvas, &theme, "Contents", &rows, "", 0);
        let text: Vec<String> = (0..12).map(|y| canvas.row_text(y)).collect();
        let top = text.iter().position(|l| l.contains('╭')).unwrap();
        assert!(text[top].contains(" Contents "));
        assert!(text[top + 1].contains("a First"));
        assert!(text[top + 2].contains("s Second"));
        assert!(text[top + 3].contains('╰'));
    }

    #[test]
    fn list_box_dims_background() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(40, 12);
        canvas.write_str(0, 0, "page", Style::default());
        render_list_overlay(&mut canvas, &theme, "T", &[], "", 0);
        assert!(canvas.get(0, 0).style.has(StyleFlags::DIM));
        let all: String = (0..12).map(|y| canvas.row_text(y)).collect();
        assert!(all.contains("(none)"));
    }

    #[test]
    fn scroll_indicators() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(40, 10);
        let labels = generate_labels(20);
        let rows: Vec<OverlayRow> = labels
            .iter()
            .map(|l| OverlayRow {
                label: l.clone(),
                text: format!("item {l}"),
                ..OverlayRow::default()
            })
            .collect();
        render_list_overlay(&mut canvas, &theme, "Links", &rows, "", 3);
        let all: Vec<String> = (0..10).map(|y| canvas.row_text(y)).collect();
        assert!(all.iter().any(|l| l.contains('▲')));
        assert!(all.iter().any(|l| l.contains('▼')));
        // Four rows fit; the first shown is the fourth item.
        assert!(all.iter().any(|l| l.contains("item af")));
        assert!(!all.iter().any(|l| l.contains("item ad")));
    }

    #[test]
    fn unmatched_rows_are_dimmed() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(40, 12);
        let rows = vec![
            OverlayRow {
                label: "a".into(),
                text: "Keep".into(),
                ..OverlayRow::default()
            },
            OverlayRow {
                label: "s".into(),
                text: "Fade".into(),
                ..OverlayRow::default()
            },
        ];
        render_list_overlay(&mut canvas, &theme, "T", &rows, "a", 0);
        let y = (0..12).find(|&y| canvas.row_text(y).contains("Fade")).unwrap();
        let row = canvas.row_text(y);
        let x = row[..row.find("Fade").unwrap()].chars().count();
        assert_eq!(canvas.get(x as i32, y).style, theme.dim);
    }

    #[test]
    fn toc_rows_show_numbers_and_indent() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(50, 12);
        let headings = vec![
            Heading {
                level: 1,
                number: Some("1.".into()),
                text: "Intro".into(),
                y: 0,
            },
            Heading {
                level: 2,
                number: Some("1.1".into()),
                text: "Detail".into(),
                y: 4,
            },
        ];
        render_toc(&mut canvas, &theme, &headings, &generate_labels(2), "", 0);
        let all: Vec<String> = (0..12).map(|y| canvas.row_text(y)).collect();
        assert!(all.iter().any(|l| l.contains("a 1. Intro")));
        assert!(all.iter().any(|l| l.contains("s   1.1 Detail")));
    }

    #[test]
    fn items_beyond_the_labels_still_listed() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(50, 12);
        let links = [link("one", 0, 0), link("two", 0, 1), link("three", 0, 2)];
        let labels = generate_labels(1);
        let rows = labeled(&links, &labels, link_row);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, labels[0]);
        assert_eq!(rows[2].label, "");
        render_link_index(&mut canvas, &theme, &links, &labels, "", 0);
        let all: Vec<String> = (0..12).map(|y| canvas.row_text(y)).collect();
        assert!(all.iter().any(|l| l.contains("three")));
    }

    #[test]
    fn buffer_list_marks_active() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(60, 12);
        let buffers = vec![
            BufferEntry {
                title: "Home".into(),
                url: "https://a.example".into(),
                active: true,
            },
            BufferEntry {
                title: "Docs".into(),
                url: "https://b.example".into(),
                active: false,
            },
        ];
        render_buffer_list(&mut canvas, &theme, &buffers, &generate_labels(2), "", 0);
        let all: Vec<String> = (0..12).map(|y| canvas.row_text(y)).collect();
        assert!(all.iter().any(|l| l.contains("a * Home") && l.contains("https://a.example")));
        assert!(all.iter().any(|l| l.contains("s   Docs")));
    }

    #[test]
    fn label_style_by_position() {
        let theme = Theme::default();
        assert_eq!(label_style(&theme, "as", "a", 0), Some(theme.label_typed));
        assert_eq!(label_style(&theme, "as", "a", 1), Some(theme.label_rest));
        assert_eq!(label_style(&theme, "as", "s", 0), None);
    }

    #[test]
    fn rect_text_reads_cells() {
        let mut canvas = Canvas::new(5, 2);
        canvas.write_str(1, 1, "hey", Style::default());
        assert_eq!(rect_text(&canvas, Rect::new(1, 1, 3, 1)), ["hey"]);
    }
}

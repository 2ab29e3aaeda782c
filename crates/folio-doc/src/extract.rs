#![forbid(unsafe_code)]

//! Flattening inline content into styled spans.

use folio_style::Theme;
use folio_text::Span;

use crate::node::{Node, NodeKind};
use crate::positions::{FormContext, href_file_name, is_image_href};

/// Styled spans for the inline content of `node`.
///
/// Strong adds bold, emphasis adds underline, inline code is taken as
/// one dimmed leaf and links set the hyperlink target of everything
/// below them. Inputs contribute nothing.
pub fn extract_spans(node: &Node, theme: &Theme) -> Vec<Span> {
    let mut out = Vec::new();
    collect(node, theme.text, None, theme, &mut out);
    out
}

/// [`extract_spans`] over a run of sibling nodes.
pub fn extract_spans_from(nodes: &[Node], theme: &Theme) -> Vec<Span> {
    let mut out = Vec::new();
    for node in nodes {
        collect(node, theme.text, None, theme, &mut out);
    }
    out
}

/// Spans for a heading title over the heading's own `base` style.
///
/// Line breaks in the source become spaces; a heading never starts a
/// new line group.
pub(crate) fn heading_spans(node: &Node, base: folio_render::Style, theme: &Theme) -> Vec<Span> {
    let mut out = Vec::new();
    collect_children(node, base, None, theme, &mut out);
    for span in &mut out {
        if span.text.contains(['\n', '\r', '\t']) {
            span.text = span.text.replace(['\n', '\r', '\t'], " ");
        }
    }
    out
}

/// Spans for a list item, leaving nested lists to be laid out below it.
pub(crate) fn list_item_spans(item: &Node, theme: &Theme) -> Vec<Span> {
    let mut out = Vec::new();
    for child in item.children.iter().filter(|c| c.kind != NodeKind::List) {
        collect(child, theme.text, None, theme, &mut out);
    }
    out
}

fn collect(
    node: &Node,
    style: folio_render::Style,
    href: Option<&str>,
    theme: &Theme,
    out: &mut Vec<Span>,
) {
    let span = |text: String, style| Span {
        text,
        style,
        href: href.map(str::to_owned),
    };
    match &node.kind {
        NodeKind::Text { text } => {
            if !text.is_empty() {
                out.push(span(text.clone(), style));
            }
        }
        NodeKind::Code => {
            let text = node.text_content();
            if !text.is_empty() {
                out.push(span(text, style.patch(theme.code).dim()));
            }
        }
        NodeKind::Strong => collect_children(node, style.bold(), href, theme, out),
        NodeKind::Emphasis => collect_children(node, style.underline(), href, theme, out),
        NodeKind::Link { href: target } => {
            let style = style.patch(theme.link);
            if node.text_content().trim().is_empty() {
                let text = if is_image_href(target) {
                    format!("[img] {}", href_file_name(target))
                } else {
                    target.clone()
                };
                out.push(Span::link(text, style, target.as_str()));
            } else {
                collect_children(node, style, Some(target), theme, out);
            }
        }
        NodeKind::Input { .. } => {}
        _ => collect_children(node, style, href, theme, out),
    }
}

fn collect_children(
    node: &Node,
    style: folio_render::Style,
    href: Option<&str>,
    theme: &Theme,
    out: &mut Vec<Span>,
) {
    for child in &node.children {
        collect(child, style, href, theme, out);
    }
}

/// Whether spans carry any visible text.
pub(crate) fn has_text(spans: &[Span]) -> bool {
    spans.iter().any(|s| !s.text.trim().is_empty())
}

/// Every `Input` below `node`, each with its innermost enclosing form.
pub(crate) fn collect_inputs<'a>(
    node: &'a Node,
    form: &FormContext,
    out: &mut Vec<(&'a Node, FormContext)>,
) {
    match &node.kind {
        NodeKind::Input { .. } => out.push((node, form.clone())),
        NodeKind::Form { action, method } => {
            let inner = FormContext {
                action: action.clone(),
                method: method.clone(),
            };
            for child in &node.children {
                collect_inputs(child, &inner, out);
            }
        }
        _ => {
            for child in &node.children {
                collect_inputs(child, form, out);
            }
        }
    }
}

/// A unit of block layout.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Block<'a> {
    Node(&'a Node),
    /// Consecutive inline siblings laid out as one paragraph.
    Inline(&'a [Node]),
}

/// Group `children` into blocks, merging runs of inline nodes.
pub(crate) fn blocks(children: &[Node]) -> Vec<Block<'_>> {
    let mut out = Vec::new();
    let mut run_start = None;
    for (i, child) in children.iter().enumerate() {
        if child.kind.is_inline() {
            run_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = run_start.take() {
            out.push(Block::Inline(&children[start..i]));
        }
        out.push(Block::Node(child));
    }
    if let Some(start) = run_start {
        out.push(Block::Inline(&children[start..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::StyleFlags;

    fn theme() -> Theme {
        folio_style::themes::monochrome()
    }

    #[test]
    fn nesting_accumulates_flags() {
        let p = Node::paragraph(vec![
            Node::text("a "),
            Node::strong(vec![Node::emphasis(vec![Node::text("b")])]),
        ]);
        let spans = extract_spans(&p, &theme());
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "a ");
        assert!(spans[1].style.has(StyleFlags::BOLD));
        assert!(spans[1].style.has(StyleFlags::UNDERLINE));
    }

    #[test]
    fn code_is_a_dim_leaf() {
        let p = Node::paragraph(vec![Node::new(
            NodeKind::Code,
            vec![Node::text("x"), Node::strong(vec![Node::text("y")])],
        )]);
        let spans = extract_spans(&p, &theme());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "xy");
        assert!(spans[0].style.has(StyleFlags::DIM));
        assert!(!spans[0].style.has(StyleFlags::BOLD));
    }

    #[test]
    fn links_set_href_on_descendants() {
        let p = Node::paragraph(vec![Node::link(
            "/next",
            vec![Node::text("go "), Node::strong(vec![Node::text("on")])],
        )]);
        let spans = extract_spans(&p, &theme());
        assert!(spans.iter().all(|s| s.href.as_deref() == Some("/next")));
        assert_eq!(spans[1].text, "on");
    }

    #[test]
    fn empty_links_show_target() {
        let p = Node::paragraph(vec![
            Node::link("/img/cat.png", vec![]),
            Node::link("/about", vec![Node::text(" ")]),
        ]);
        let spans = extract_spans(&p, &theme());
        assert_eq!(spans[0].text, "[img] cat.png");
        assert_eq!(spans[0].href.as_deref(), Some("/img/cat.png"));
        assert_eq!(spans[1].text, "/about");
    }

    #[test]
    fn inputs_are_skipped() {
        let p = Node::paragraph(vec![Node::text("q"), Node::input("q", "v", "text")]);
        let spans = extract_spans(&p, &theme());
        assert_eq!(spans.len(), 1);
        assert!(has_text(&spans));
        assert!(!has_text(&[folio_text::Span::plain("  ")]));
    }

    #[test]
    fn list_item_spans_skip_nested_lists() {
        let item = Node::list_item(vec![
            Node::text("outer"),
            Node::list(vec![Node::list_item(vec![Node::text("inner")])]),
        ]);
        let spans = list_item_spans(&item, &theme());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "outer");
    }

    #[test]
    fn inputs_pick_up_innermost_form() {
        let doc = Node::document(vec![
            Node::input("loose", "", "text"),
            Node::form(
                "/outer",
                "get",
                vec![
                    Node::input("a", "", "text"),
                    Node::form("/inner", "post", vec![Node::input("b", "", "text")]),
                ],
            ),
        ]);
        let mut found = Vec::new();
        collect_inputs(&doc, &FormContext::default(), &mut found);
        let actions: Vec<_> = found.iter().map(|(_, f)| f.action.as_str()).collect();
        assert_eq!(actions, ["", "/outer", "/inner"]);
    }

    #[test]
    fn inline_runs_are_grouped() {
        let children = vec![
            Node::text("a"),
            Node::strong(vec![Node::text("b")]),
            Node::paragraph(vec![]),
            Node::text("c"),
        ];
        let b = blocks(&children);
        assert_eq!(b.len(), 3);
        assert!(matches!(b[0], Block::Inline(run) if run.len() == 2));
        assert!(matches!(b[1], Block::Node(_)));
        assert!(matches!(b[2], Block::Inline(run) if run.len() == 1));
    }
}

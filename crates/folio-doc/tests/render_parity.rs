#![forbid(unsafe_code)]

//! Property tests over generated documents.
//!
//! The height estimate must equal the rows a render advances, and a
//! scrolled render must show exactly the rows of an unscrolled one.

use folio_doc::{Node, RenderOptions, Renderer, content_height};
use folio_render::Cell;
use folio_style::Theme;
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        8 => "[a-z]{1,9}",
        1 => "[A-Z][a-z]{0,14}",
        1 => Just("世界".to_string()),
        1 => Just("naïve".to_string()),
    ]
}

fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..max).prop_map(|w| w.join(" "))
}

fn inline() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => words(12).prop_map(|t| Node::text(format!("{t} "))),
        1 => words(3).prop_map(|t| Node::strong(vec![Node::text(t)])),
        1 => words(3).prop_map(|t| Node::emphasis(vec![Node::text(t)])),
        1 => word().prop_map(|w| Node::code(w)),
        1 => (word(), words(3)).prop_map(|(href, t)| Node::link(format!("/{href}"), vec![Node::text(t)])),
        1 => word().prop_map(|name| Node::link(format!("/img/{name}.png"), vec![])),
    ]
}

fn list_item() -> impl Strategy<Value = Node> {
    (
        prop::collection::vec(inline(), 0..3),
        prop::option::of(prop::collection::vec(words(6), 0..3)),
    )
        .prop_map(|(mut children, nested)| {
            if let Some(items) = nested {
                children.push(Node::list(
                    items
                        .into_iter()
                        .map(|t| Node::list_item(vec![Node::text(t)]))
                        .collect(),
                ));
            }
            Node::list_item(children)
        })
}

fn table() -> impl Strategy<Value = Node> {
    (prop::collection::vec(prop::collection::vec(words(4), 0..5), 0..5), any::<bool>())
        .prop_map(|(rows, header)| {
            Node::table(
                rows.into_iter()
                    .enumerate()
                    .map(|(r, cells)| {
                        Node::table_row(
                            cells
                                .into_iter()
                                .map(|t| {
                                    if header && r == 0 {
                                        Node::header_cell(vec![Node::text(t)])
                                    } else {
                                        Node::table_cell(vec![Node::text(t)])
                                    }
                                })
                                .collect(),
                        )
                    })
                    .collect(),
            )
        })
}

fn input() -> impl Strategy<Value = Node> {
    (
        "[a-z]{0,6}",
        "[a-z ]{0,30}",
        prop_oneof![
            Just("text"),
            Just("password"),
            Just("hidden"),
            Just("submit"),
            Just("")
        ],
    )
        .prop_map(|(name, value, ty)| Node::input(name, value, ty))
}

fn block() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => (0u8..5, words(10)).prop_map(|(level, t)| Node::heading(level, t)),
        6 => prop::collection::vec(prop_oneof![4 => inline(), 1 => input()], 0..5)
            .prop_map(Node::paragraph),
        2 => prop::collection::vec(list_item(), 0..4).prop_map(Node::list),
        1 => prop::collection::vec(words(20), 0..3).prop_map(|ps| {
            Node::blockquote(ps.into_iter().map(|t| Node::paragraph(vec![Node::text(t)])).collect())
        }),
        1 => prop::collection::vec("[ -~\t]{0,50}", 0..5).prop_map(|lines| Node::code_block(lines.join("\n"))),
        1 => table(),
        1 => (prop::collection::vec(input(), 0..4), "[a-z/]{0,8}")
            .prop_map(|(inputs, action)| Node::form(action, "post", inputs)),
        1 => inline(),
    ]
}

fn document() -> impl Strategy<Value = Node> {
    prop::collection::vec(block(), 0..12).prop_map(Node::document)
}

fn options() -> impl Strategy<Value = RenderOptions> {
    (20usize..100, 0usize..4, any::<bool>(), 4usize..30, any::<bool>()).prop_map(
        |(max, margin, justify, input_width, number)| {
            RenderOptions::new()
                .max_content_width(max)
                .min_margin(margin)
                .justify(justify)
                .input_width(input_width)
                .number_headings(number)
        },
    )
}

fn rows(r: &Renderer) -> Vec<String> {
    (0..i32::from(r.height()))
        .map(|y| r.canvas().row_text(y))
        .collect()
}

proptest! {
    #[test]
    fn height_estimate_matches_render(doc in document(), opts in options(), width in 0u16..140) {
        let mut r = Renderer::new(width, 24).with_options(opts.clone());
        r.render(&doc, 0);
        prop_assert_eq!(r.content_height(&doc), r.frame().content_height);
        prop_assert_eq!(
            content_height(&doc, width, &opts, &Theme::default()),
            r.frame().content_height
        );
    }

    #[test]
    fn scrolled_render_is_a_window(doc in document(), width in 10u16..100, scroll in 0usize..40) {
        let total = Renderer::new(width, 1).content_height(&doc);
        let full_height = u16::try_from(total.max(1)).unwrap();
        let mut full = Renderer::new(width, full_height);
        full.render(&doc, 0);
        let mut window = Renderer::new(width, 8);
        window.render(&doc, scroll);
        let full_rows = rows(&full);
        for (i, row) in rows(&window).iter().enumerate() {
            let expected = full_rows
                .get(scroll + i)
                .cloned()
                .unwrap_or_else(|| " ".repeat(usize::from(width)));
            prop_assert_eq!(row, &expected);
        }
    }

    #[test]
    fn recorded_positions_are_inside_the_document(doc in document(), width in 10u16..100) {
        let mut r = Renderer::new(width, 24);
        r.render(&doc, 0);
        let height = r.frame().content_height;
        for link in r.links() {
            prop_assert!(link.y < height);
            prop_assert!(!link.text.is_empty());
        }
        for input in r.inputs() {
            prop_assert!(input.y < height);
        }
        for heading in r.headings() {
            prop_assert!(heading.y < height);
        }
        prop_assert!(r.paragraphs().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn visible_positions_match_canvas(doc in document(), scroll in 0usize..30) {
        let mut r = Renderer::new(60, 10);
        r.render(&doc, scroll);
        for link in r.visible_links() {
            let y = i32::try_from(link.screen_y(scroll).unwrap()).unwrap();
            let x = i32::try_from(link.x).unwrap();
            prop_assert_ne!(r.canvas().get(x, y).link, Cell::LINK_ID_NONE);
        }
    }
}

#[test]
fn headings_numbered_by_section() {
    let doc = Node::document(vec![
        Node::heading(2, "Preface"),
        Node::heading(1, "One"),
        Node::heading(2, "One A"),
        Node::heading(3, "One A i"),
        Node::heading(1, "Two"),
        Node::heading(3, "Two ? i"),
    ]);
    let mut r = Renderer::new(60, 40);
    r.render(&doc, 0);
    let numbers: Vec<Option<&str>> = r.headings().iter().map(|h| h.number.as_deref()).collect();
    assert_eq!(
        numbers,
        [None, Some("1."), Some("1.1"), Some("1.1.1"), Some("2."), None]
    );
}

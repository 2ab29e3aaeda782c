#![forbid(unsafe_code)]

//! The document tree.
//!
//! An external HTML or markdown parser produces a [`Node`] tree; the
//! renderer only reads it. Node kinds carry their attributes inline so a
//! match on [`NodeKind`] is all a consumer needs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Kind and attributes of a document node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum NodeKind {
    Document,
    /// Heading of level 1 to 3. Deeper levels render as level 3.
    Heading {
        level: u8,
    },
    Paragraph,
    List,
    ListItem,
    Blockquote,
    /// Preformatted text; its text descendants are kept verbatim.
    CodeBlock,
    Table,
    TableRow,
    TableCell {
        #[cfg_attr(feature = "serde", serde(default))]
        is_header: bool,
    },
    Link {
        href: String,
    },
    Strong,
    Emphasis,
    /// Inline code.
    Code,
    Text {
        text: String,
    },
    Form {
        #[cfg_attr(feature = "serde", serde(default))]
        action: String,
        #[cfg_attr(feature = "serde", serde(default))]
        method: String,
    },
    Input {
        #[cfg_attr(feature = "serde", serde(default))]
        name: String,
        #[cfg_attr(feature = "serde", serde(default))]
        value: String,
        /// HTML input type (`text`, `password`, `submit`, `hidden`, ...).
        #[cfg_attr(feature = "serde", serde(default, rename = "type"))]
        input_type: String,
    },
}

impl NodeKind {
    /// Short lowercase name, used in log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Heading { .. } => "heading",
            Self::Paragraph => "paragraph",
            Self::List => "list",
            Self::ListItem => "list_item",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "code_block",
            Self::Table => "table",
            Self::TableRow => "table_row",
            Self::TableCell { .. } => "table_cell",
            Self::Link { .. } => "link",
            Self::Strong => "strong",
            Self::Emphasis => "emphasis",
            Self::Code => "code",
            Self::Text { .. } => "text",
            Self::Form { .. } => "form",
            Self::Input { .. } => "input",
        }
    }

    /// Inline kinds flow into the surrounding paragraph.
    pub const fn is_inline(&self) -> bool {
        matches!(
            self,
            Self::Text { .. } | Self::Strong | Self::Emphasis | Self::Code | Self::Link { .. }
        )
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: NodeKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Document, children)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Heading { level }, vec![Self::text(text)])
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Paragraph, children)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text { text: text.into() }, Vec::new())
    }

    pub fn strong(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Strong, children)
    }

    pub fn emphasis(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Emphasis, children)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Code, vec![Self::text(text)])
    }

    pub fn link(href: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(NodeKind::Link { href: href.into() }, children)
    }

    pub fn list(items: Vec<Node>) -> Self {
        Self::new(NodeKind::List, items)
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Self::new(NodeKind::ListItem, children)
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Blockquote, children)
    }

    pub fn code_block(text: impl Into<String>) -> Self {
        Self::new(NodeKind::CodeBlock, vec![Self::text(text)])
    }

    pub fn table(rows: Vec<Node>) -> Self {
        Self::new(NodeKind::Table, rows)
    }

    pub fn table_row(cells: Vec<Node>) -> Self {
        Self::new(NodeKind::TableRow, cells)
    }

    pub fn table_cell(children: Vec<Node>) -> Self {
        Self::new(NodeKind::TableCell { is_header: false }, children)
    }

    pub fn header_cell(children: Vec<Node>) -> Self {
        Self::new(NodeKind::TableCell { is_header: true }, children)
    }

    pub fn form(action: impl Into<String>, method: impl Into<String>, children: Vec<Node>) -> Self {
        Self::new(
            NodeKind::Form {
                action: action.into(),
                method: method.into(),
            },
            children,
        )
    }

    pub fn input(
        name: impl Into<String>,
        value: impl Into<String>,
        input_type: impl Into<String>,
    ) -> Self {
        Self::new(
            NodeKind::Input {
                name: name.into(),
                value: value.into(),
                input_type: input_type.into(),
            },
            Vec::new(),
        )
    }

    /// Concatenated text of every `Text` descendant, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeKind::Text { text } = &self.kind {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Text content with whitespace runs collapsed to single spaces.
    pub fn normalized_text(&self) -> String {
        self.text_content()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First `Link` at or below this node, depth first.
    pub fn first_link(&self) -> Option<&str> {
        if let NodeKind::Link { href } = &self.kind {
            return Some(href);
        }
        self.children.iter().find_map(Node::first_link)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

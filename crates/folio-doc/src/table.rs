#![forbid(unsafe_code)]

//! Table layout.
//!
//! Column widths come from the widest cell in each column, clamped to
//! `[MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH]`. When the bordered table is
//! wider than the content column the widest column shrinks one cell at a
//! time until it fits or every column is at the minimum.
//!
//! ```text
//! ┌───────┬─────┐
//! │ Name  │ Age │   <- header
//! ┝━━━━━━━┿━━━━━┥
//! │ Alice │ 30  │
//! └───────┴─────┘
//! ```

use folio_text::{string_width, truncate_with_ellipsis};
use tracing::warn;

use crate::node::{Node, NodeKind};

pub const MIN_COLUMN_WIDTH: usize = 3;
pub const MAX_COLUMN_WIDTH: usize = 40;

/// One laid-out cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub is_header: bool,
    pub href: Option<String>,
}

/// A line of the drawn table, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableLine {
    Top,
    Row(usize),
    HeaderRule,
    Bottom,
}

/// Measured table ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// Content width of each column, excluding padding and borders.
    pub widths: Vec<usize>,
    /// Non-empty rows, padded to the column count.
    pub rows: Vec<Vec<TableCell>>,
    /// Index into `rows` of the header row.
    pub header: Option<usize>,
    /// Left offset that centers the table in the content column.
    pub offset: usize,
}

impl TableLayout {
    /// Measure `table` for a content column `content_width` cells wide.
    ///
    /// Returns `None` when the table has no non-empty rows.
    pub fn compute(table: &Node, content_width: usize) -> Option<Self> {
        let mut rows: Vec<Vec<TableCell>> = table
            .children
            .iter()
            .filter(|row| row.kind == NodeKind::TableRow)
            .map(row_cells)
            .filter(|cells| cells.iter().any(|c| !c.text.is_empty()))
            .collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return None;
        }
        for row in &mut rows {
            row.resize_with(columns, TableCell::default);
        }

        let mut widths = vec![0; columns];
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(string_width(&cell.text));
            }
        }
        for w in &mut widths {
            *w = (*w).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        }
        shrink_to_fit(&mut widths, content_width);

        let header = rows
            .iter()
            .position(|row| row.first().is_some_and(|c| c.is_header));
        let mut layout = Self {
            widths,
            rows,
            header,
            offset: 0,
        };
        layout.offset = content_width.saturating_sub(layout.total_width()) / 2;
        Some(layout)
    }

    /// Width of every border and row line.
    pub fn total_width(&self) -> usize {
        1 + self.widths.iter().map(|w| w + 3).sum::<usize>()
    }

    /// Whether a heavy rule is drawn under the header row.
    pub fn has_header_rule(&self) -> bool {
        self.header.is_some()
    }

    /// Lines in drawing order.
    pub fn lines(&self) -> Vec<TableLine> {
        let mut out = Vec::with_capacity(self.rows.len() + 3);
        out.push(TableLine::Top);
        for i in 0..self.rows.len() {
            out.push(TableLine::Row(i));
            if self.has_header_rule() && self.header == Some(i) {
                out.push(TableLine::HeaderRule);
            }
        }
        out.push(TableLine::Bottom);
        out
    }

    /// Rows occupied, including the blank line after the table.
    pub fn height(&self) -> usize {
        self.rows.len() + 2 + usize::from(self.has_header_rule()) + 1
    }

    /// Column where the text of `col` starts, relative to the table.
    pub fn column_x(&self, col: usize) -> usize {
        2 + self.widths[..col].iter().map(|w| w + 3).sum::<usize>()
    }

    /// Border line text for the non-row lines.
    pub fn border(&self, line: TableLine) -> String {
        let (left, fill, join, right) = match line {
            TableLine::Top => ('┌', '─', '┬', '┐'),
            TableLine::HeaderRule => ('┝', '━', '┿', '┥'),
            TableLine::Bottom | TableLine::Row(_) => ('└', '─', '┴', '┘'),
        };
        let mut out = String::new();
        out.push(left);
        for (i, w) in self.widths.iter().enumerate() {
            if i > 0 {
                out.push(join);
            }
            out.extend(std::iter::repeat_n(fill, w + 2));
        }
        out.push(right);
        out
    }

    /// Cell text cut and padded to its column width.
    ///
    /// Overlong text ends in `…`. Padding is split with the odd cell on
    /// the right.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        let width = self.widths[col];
        let cell = &self.rows[row][col];
        let text = if string_width(&cell.text) > width {
            truncate_with_ellipsis(&cell.text, width, "…")
        } else {
            cell.text.clone()
        };
        let pad = width.saturating_sub(string_width(&text));
        let left = pad / 2;
        let mut out = " ".repeat(left);
        out.push_str(&text);
        out.extend(std::iter::repeat_n(' ', pad - left));
        out
    }

    /// Full text of a row line, borders included.
    pub fn row_text(&self, row: usize) -> String {
        let mut out = String::from("│");
        for col in 0..self.widths.len() {
            out.push(' ');
            out.push_str(&self.cell_text(row, col));
            out.push_str(" │");
        }
        out
    }

    /// Text of any line.
    pub fn line_text(&self, line: TableLine) -> String {
        match line {
            TableLine::Row(i) => self.row_text(i),
            other => self.border(other),
        }
    }
}

/// Rows occupied by `table`, 0 when it has nothing to show.
pub fn table_height(table: &Node, content_width: usize) -> usize {
    TableLayout::compute(table, content_width).map_or(0, |t| t.height())
}

fn row_cells(row: &Node) -> Vec<TableCell> {
    row.children
        .iter()
        .filter_map(|cell| match cell.kind {
            NodeKind::TableCell { is_header } => Some(TableCell {
                text: cell.normalized_text(),
                is_header,
                href: cell.first_link().map(str::to_owned),
            }),
            _ => None,
        })
        .collect()
}

fn shrink_to_fit(widths: &mut [usize], content_width: usize) {
    let total = |widths: &[usize]| 1 + widths.iter().map(|w| w + 3).sum::<usize>();
    while total(widths) > content_width {
        let Some((idx, &widest)) = widths
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|&(_, w)| *w)
        else {
            return;
        };
        if widest <= MIN_COLUMN_WIDTH {
            warn!(
                table_width = total(widths),
                content_width, "table does not fit at minimum column widths"
            );
            return;
        }
        widths[idx] -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> Node {
        Node::table_cell(vec![Node::text(text)])
    }

    fn header(text: &str) -> Node {
        Node::header_cell(vec![Node::text(text)])
    }

    fn people() -> Node {
        Node::table(vec![
            Node::table_row(vec![header("Name"), header("Age")]),
            Node::table_row(vec![cell("Alice"), cell("30")]),
            Node::table_row(vec![cell("Bob"), cell("4")]),
        ])
    }

    #[test]
    fn widths_come_from_widest_cell() {
        let t = TableLayout::compute(&people(), 80).unwrap();
        assert_eq!(t.widths, [5, 3]);
        assert_eq!(t.total_width(), 15);
        assert_eq!(t.offset, 32);
        assert_eq!(t.height(), 3 + 2 + 1 + 1);
    }

    #[test]
    fn drawn_lines() {
        let t = TableLayout::compute(&people(), 15).unwrap();
        let text: Vec<String> = t.lines().into_iter().map(|l| t.line_text(l)).collect();
        assert_eq!(
            text,
            [
                "┌───────┬─────┐",
                "│ Name  │ Age │",
                "┝━━━━━━━┿━━━━━┥",
                "│ Alice │ 30  │",
                "│  Bob  │  4  │",
                "└───────┴─────┘",
            ]
        );
    }

    #[test]
    fn interior_rows_share_one_width() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![header("Name"), header("Value")]),
                Node::table_row(vec![cell("foo"), cell("bar")]),
                Node::table_row(vec![cell("longer"), cell("x")]),
            ]),
            80,
        )
        .unwrap();
        let text: Vec<String> = t.lines().into_iter().map(|l| t.line_text(l)).collect();
        assert!(text.first().is_some_and(|l| l.starts_with('┌')));
        assert!(text.last().is_some_and(|l| l.ends_with('┘')));
        assert!(text.iter().all(|l| string_width(l) == 18));
    }

    #[test]
    fn header_centering_leaves_odd_cell_right() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![header("ab")]),
                Node::table_row(vec![cell("abcde")]),
            ]),
            80,
        )
        .unwrap();
        assert_eq!(t.cell_text(0, 0), " ab  ");
    }

    #[test]
    fn body_cells_split_padding() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![header("Header")]),
                Node::table_row(vec![cell("ab")]),
                Node::table_row(vec![cell("abc")]),
            ]),
            80,
        )
        .unwrap();
        assert_eq!(t.cell_text(1, 0), "  ab  ");
        assert_eq!(t.cell_text(2, 0), " abc  ");
    }

    #[test]
    fn lone_header_keeps_its_rule() {
        let t = TableLayout::compute(&Node::table(vec![Node::table_row(vec![header("H")])]), 80)
            .unwrap();
        assert!(t.has_header_rule());
        assert_eq!(
            t.lines(),
            [
                TableLine::Top,
                TableLine::Row(0),
                TableLine::HeaderRule,
                TableLine::Bottom
            ]
        );
        assert_eq!(t.height(), 5);
    }

    #[test]
    fn trailing_header_row_gets_rule() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![cell("x")]),
                Node::table_row(vec![header("H")]),
            ]),
            80,
        )
        .unwrap();
        let text: Vec<String> = t.lines().into_iter().map(|l| t.line_text(l)).collect();
        assert_eq!(
            text,
            ["┌─────┐", "│  x  │", "│  H  │", "┝━━━━━┥", "└─────┘"]
        );
        assert_eq!(t.height(), text.len() + 1);
    }

    #[test]
    fn empty_rows_are_dropped() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![cell(" "), cell("")]),
                Node::table_row(vec![cell("x")]),
                Node::table_row(vec![]),
            ]),
            80,
        )
        .unwrap();
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.widths, [3]);
        assert!(TableLayout::compute(&Node::table(vec![]), 80).is_none());
        assert_eq!(table_height(&Node::table(vec![Node::table_row(vec![])]), 80), 0);
    }

    #[test]
    fn short_rows_are_padded() {
        let t = TableLayout::compute(
            &Node::table(vec![
                Node::table_row(vec![cell("a"), cell("b"), cell("c")]),
                Node::table_row(vec![cell("d")]),
            ]),
            80,
        )
        .unwrap();
        assert_eq!(t.rows[1].len(), 3);
        assert_eq!(
            string_width(&t.row_text(0)),
            string_width(&t.row_text(1))
        );
    }

    #[test]
    fn widest_column_shrinks_first() {
        let long = "x".repeat(30);
        let t = TableLayout::compute(
            &Node::table(vec![Node::table_row(vec![cell(&long), cell("short")])]),
            30,
        )
        .unwrap();
        assert_eq!(t.total_width(), 30);
        assert_eq!(t.widths, [18, 5]);
        assert!(t.cell_text(0, 0).ends_with('…'));
        assert_eq!(string_width(&t.cell_text(0, 0)), 18);
    }

    #[test]
    fn column_width_is_capped() {
        let long = "y".repeat(60);
        let t = TableLayout::compute(&Node::table(vec![Node::table_row(vec![cell(&long)])]), 200)
            .unwrap();
        assert_eq!(t.widths, [MAX_COLUMN_WIDTH]);
    }

    #[test]
    fn column_x_offsets() {
        let t = TableLayout::compute(&people(), 80).unwrap();
        assert_eq!(t.column_x(0), 2);
        assert_eq!(t.column_x(1), 10);
    }

    #[test]
    fn cell_links_are_kept() {
        let t = TableLayout::compute(
            &Node::table(vec![Node::table_row(vec![Node::table_cell(vec![Node::link(
                "/a",
                vec![Node::text("A")],
            )])])]),
            80,
        )
        .unwrap();
        assert_eq!(t.rows[0][0].href.as_deref(), Some("/a"));
    }
}

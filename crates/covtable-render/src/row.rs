//! Header, separator and data rows.

use crate::cell::{Align, CellFormatter};
use crate::classify::{Classification, Classify};
use crate::layout::{TableLayout, COL_DELIM, DELIM, MISSING_COLS, PCT_COLS, ROOT_LABEL};
use crate::model::{CoverageNode, MetricKind, NodeKind};

/// Header text of the uncovered-lines column.
pub const UNCOVERED_HEADER: &str = "Uncovered Lines";

/// Builds the rows of one table from its planned layout.
pub struct RowBuilder<'a> {
    layout: TableLayout,
    cells: CellFormatter<'a>,
    classifier: &'a dyn Classify,
}

impl<'a> RowBuilder<'a> {
    pub fn new(layout: TableLayout, cells: CellFormatter<'a>, classifier: &'a dyn Classify) -> Self {
        Self {
            layout,
            cells,
            classifier,
        }
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Dashes under every column.
    pub fn separator(&self) -> String {
        let mut columns = vec!["-".repeat(self.layout.name_width)];
        columns.extend(MetricKind::ALL.iter().map(|_| "-".repeat(PCT_COLS)));
        if self.layout.shows_uncovered() {
            columns.push("-".repeat(MISSING_COLS));
        }
        columns.join(COL_DELIM) + COL_DELIM
    }

    pub fn header(&self) -> String {
        let mut columns = vec![self.cells.format(
            self.layout.label(),
            self.layout.name_width,
            Align::Left,
            0,
            None,
        )];
        for kind in MetricKind::ALL {
            columns.push(self.pct_cell(kind.header(), None));
        }
        if self.layout.shows_uncovered() {
            columns.push(
                self.cells
                    .format(UNCOVERED_HEADER, MISSING_COLS, Align::Right, 0, None),
            );
        }
        columns.join(DELIM) + DELIM
    }

    /// One data row; `level` 0 is the totals row of the root.
    pub fn row(&self, node: &CoverageNode, level: usize) -> String {
        let metrics = node.row_metrics();
        let totals = &metrics.totals;
        let name = if level == 0 {
            ROOT_LABEL
        } else {
            node.display_name()
        };

        let mut columns = vec![self.cells.format(
            name,
            self.layout.name_width,
            Align::Left,
            level,
            Some(self.classifier.classify(MetricKind::Statements, totals)),
        )];
        for kind in MetricKind::ALL {
            let pct = totals.get(kind).pct.to_string();
            columns.push(self.pct_cell(&pct, Some(self.classifier.classify(kind, totals))));
        }
        if self.layout.shows_uncovered() {
            let missing = match node.kind {
                NodeKind::File => join_lines(&metrics.uncovered_lines()),
                NodeKind::Dir => String::new(),
            };
            columns.push(self.cells.format(
                &missing,
                MISSING_COLS,
                Align::Right,
                0,
                Some(Classification::Low),
            ));
        }
        columns.join(DELIM) + DELIM
    }

    fn pct_cell(&self, value: &str, class: Option<Classification>) -> String {
        self.cells.format(value, PCT_COLS, Align::Right, 0, class)
    }
}

fn join_lines(lines: &[u32]) -> String {
    lines
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::display_width;
    use crate::classify::Watermarks;
    use crate::model::{CoverageMetrics, Metric};
    use crate::palette::{Palette, TextMode};

    fn file(name: &str, total: u64, covered: u64) -> CoverageNode {
        CoverageNode::file(name, CoverageMetrics::uniform(Metric::new(total, covered, 0)))
    }

    fn builder<'a>(
        layout: TableLayout,
        palette: &'a Palette,
        marks: &'a Watermarks,
        mode: TextMode,
    ) -> RowBuilder<'a> {
        RowBuilder::new(layout, CellFormatter::new(palette, mode), marks)
    }

    #[test]
    fn test_file_table_header_and_separator() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 8,
            kind: None,
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);

        assert_eq!(
            rows.header(),
            "File     |  % Stmts | % Branch |  % Funcs |  % Lines |Uncovered Lines |"
        );
        assert_eq!(
            rows.separator(),
            "---------|----------|----------|----------|----------|----------------|"
        );
        assert_eq!(display_width(&rows.header()), layout.line_width());
    }

    #[test]
    fn test_dir_table_has_no_uncovered_column() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 9,
            kind: Some(NodeKind::Dir),
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);

        assert_eq!(
            rows.header(),
            "Directory |  % Stmts | % Branch |  % Funcs |  % Lines |"
        );
        assert!(!rows.separator().contains(&"-".repeat(MISSING_COLS)));
        assert_eq!(display_width(&rows.separator()), layout.line_width());
    }

    #[test]
    fn test_file_row_shows_uncovered_lines() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 8,
            kind: None,
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);
        let node = CoverageNode::file(
            "b.js",
            CoverageMetrics::uniform(Metric::new(10, 5, 0))
                .with_line_hits([(7, 0), (3, 0), (4, 2)]),
        );

        assert_eq!(
            rows.row(&node, 2),
            "  b.js   |       50 |       50 |       50 |       50 |            3,7 |"
        );
    }

    #[test]
    fn test_row_classifies_every_cell() {
        let palette = Palette::empty();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 6,
            kind: Some(NodeKind::File),
        };
        let rows = builder(layout, &palette, &marks, TextMode::Debug);
        let row = rows.row(&file("a.js", 10, 9), 1);

        assert!(row.starts_with(" [high]a.js [/high] |"));
        assert_eq!(row.matches("[high]").count(), 5);
        // Uncovered lines are always flagged, even when empty.
        assert!(row.contains("[low]               [/low]"));
    }

    #[test]
    fn test_dir_row_uses_recursive_metrics() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 6,
            kind: Some(NodeKind::Dir),
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);
        let dir = CoverageNode::dir(
            "lib/",
            vec![CoverageNode::dir("lib/x/", vec![file("lib/x/a.js", 4, 1)])],
        );

        assert_eq!(
            rows.row(&dir, 1),
            " lib/  |       25 |       25 |       25 |       25 |"
        );
    }

    #[test]
    fn test_totals_row_uses_root_label() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 5,
            kind: None,
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);
        let root = CoverageNode::dir("src/", vec![file("src/a.js", 3, 2)]);

        let row = rows.row(&root, 0);
        assert!(row.starts_with("All   |    66.67 |"));
        // Directory rows leave the uncovered column blank.
        assert!(row.ends_with("|                |"));
    }

    #[test]
    fn test_long_uncovered_list_keeps_tail() {
        let palette = Palette::default();
        let marks = Watermarks::default();
        let layout = TableLayout {
            name_width: 4,
            kind: None,
        };
        let rows = builder(layout, &palette, &marks, TextMode::Plain);
        let node = CoverageNode::file(
            "c.js",
            CoverageMetrics::uniform(Metric::new(20, 0, 0))
                .with_line_hits((1..=20).map(|line| (line, 0))),
        );

        let row = rows.row(&node, 1);
        assert!(row.ends_with("|... 17,18,19,20 |"));
        assert_eq!(display_width(&row), layout.line_width());
    }
}

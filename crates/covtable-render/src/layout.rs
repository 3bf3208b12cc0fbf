//! Column geometry of the coverage table.
//!
//! The table has a name column whose width depends on the tree, four
//! percentage columns of [`PCT_COLS`] and, except in directory tables, an
//! uncovered-lines column of [`MISSING_COLS`]. Every column is followed by
//! [`DELIM`] in data rows and [`COL_DELIM`] in separator rows, both two
//! columns wide.
//!
//! The `max_cols` budget is the exact line width. [`stats_width`] counts only
//! the columns a table actually shows, so a clamped directory table is as wide
//! as a clamped file table rather than 17 columns narrower.
//!
//! ```text
//! ---------|---------|----------|---------|---------|-----------------|
//! File     | % Stmts | % Branch | % Funcs | % Lines | Uncovered Lines |
//! ---------|---------|----------|---------|---------|-----------------|
//! ```

use crate::cell::display_width;
use crate::model::{CoverageNode, NodeKind};

/// Width of each percentage column.
pub const PCT_COLS: usize = 9;
/// Width of the uncovered-lines column.
pub const MISSING_COLS: usize = 15;
/// Columns of indentation per tree level.
pub const TAB_SIZE: usize = 1;
/// Column terminator in header and data rows.
pub const DELIM: &str = " |";
/// Column terminator in separator rows.
pub const COL_DELIM: &str = "-|";
/// Prefix of a truncated value.
pub const ELLIPSIS: &str = "... ";
/// Display name of the root node.
pub const ROOT_LABEL: &str = "All";

/// Planned widths for one table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableLayout {
    /// Width of the name column.
    pub name_width: usize,
    /// Row kind the table is restricted to, if any.
    pub kind: Option<NodeKind>,
}

impl TableLayout {
    /// Sizes the name column for `root`, capping the whole table at
    /// `max_cols` when it is non-zero.
    pub fn plan(root: &CoverageNode, kind: Option<NodeKind>, max_cols: usize) -> Self {
        let name_width = plan_name_width(root, max_cols, stats_width(kind));
        Self { name_width, kind }
    }

    /// Directory tables have no uncovered-lines column.
    pub fn shows_uncovered(&self) -> bool {
        self.kind != Some(NodeKind::Dir)
    }

    /// Header of the name column.
    pub fn label(&self) -> &'static str {
        match self.kind {
            Some(NodeKind::Dir) => "Directory",
            _ => "File",
        }
    }

    /// Display width of every line in the table.
    pub fn line_width(&self) -> usize {
        self.name_width + DELIM.len() + stats_width(self.kind)
    }
}

/// Width of everything right of the name column, delimiters included.
pub fn stats_width(kind: Option<NodeKind>) -> usize {
    let pct = 4 * (PCT_COLS + DELIM.len());
    match kind {
        Some(NodeKind::Dir) => pct,
        _ => pct + MISSING_COLS + DELIM.len(),
    }
}

/// Width the name column needs to show every node untruncated.
pub fn natural_name_width(root: &CoverageNode) -> usize {
    fn walk(node: &CoverageNode, level: usize, widest: usize) -> usize {
        let name = if level == 0 {
            ROOT_LABEL
        } else {
            node.display_name()
        };
        let ideal = TAB_SIZE * level + display_width(name);
        node.children
            .iter()
            .fold(widest.max(ideal), |acc, child| walk(child, level + 1, acc))
    }
    walk(root, 0, 0)
}

/// Name column width, clamped so a table with `max_cols > 0` fits.
pub fn plan_name_width(root: &CoverageNode, max_cols: usize, stats_width: usize) -> usize {
    let natural = natural_name_width(root);
    if max_cols == 0 {
        return natural;
    }
    let max_remaining = max_cols.saturating_sub(stats_width + DELIM.len());
    natural.min(max_remaining)
}

//! Coverage tree consumed by the table renderer.
//!
//! The tree is produced by a summarizer outside this crate. Each node carries
//! its own counts ([`CoverageNode::metrics`]) and the counts aggregated over
//! its whole subtree ([`CoverageNode::recursive_metrics`]). For files both are
//! the same; for directories the renderer always reads the recursive side.
//!
//! [`CoverageNode::file`] and [`CoverageNode::dir`] build well-formed trees in
//! code. Trees can also be deserialized from JSON or YAML:
//!
//! ```rust
//! use covtable_render::{CoverageMetrics, CoverageNode, Metric, NodeKind};
//!
//! let a = CoverageNode::file(
//!     "src/a.rs",
//!     CoverageMetrics::uniform(Metric::new(10, 10, 0)),
//! );
//! let b = CoverageNode::file(
//!     "src/b.rs",
//!     CoverageMetrics::uniform(Metric::new(10, 5, 0)).with_line_hits([(3, 0), (7, 0)]),
//! );
//! let root = CoverageNode::dir("", vec![CoverageNode::dir("src/", vec![a, b])]);
//!
//! assert_eq!(root.kind, NodeKind::Dir);
//! assert_eq!(root.recursive_metrics.totals.statements.pct, 75.0);
//! assert_eq!(root.children[0].children[1].display_name(), "b.rs");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::ROOT_LABEL;

/// Whether a node is a source file or a directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Dir => "dir",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four independent metric groups shown in every table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Statements,
    Branches,
    Functions,
    Lines,
}

impl MetricKind {
    /// Column order of the percentage cells.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Statements,
        MetricKind::Branches,
        MetricKind::Functions,
        MetricKind::Lines,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Statements => "statements",
            MetricKind::Branches => "branches",
            MetricKind::Functions => "functions",
            MetricKind::Lines => "lines",
        }
    }

    /// Header text of the percentage column for this metric.
    pub fn header(&self) -> &'static str {
        match self {
            MetricKind::Statements => "% Stmts",
            MetricKind::Branches => "% Branch",
            MetricKind::Functions => "% Funcs",
            MetricKind::Lines => "% Lines",
        }
    }
}

/// Counts for one metric group.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub total: u64,
    pub covered: u64,
    pub skipped: u64,
    /// Covered percentage, two decimals. `100` when nothing is instrumented.
    pub pct: f64,
}

impl Metric {
    /// Builds a metric and derives its percentage.
    pub fn new(total: u64, covered: u64, skipped: u64) -> Self {
        Self {
            total,
            covered,
            skipped,
            pct: percent(covered, total),
        }
    }

    /// Sums two metrics and recomputes the percentage.
    pub fn merge(&self, other: &Metric) -> Metric {
        Metric::new(
            self.total + other.total,
            self.covered + other.covered,
            self.skipped + other.skipped,
        )
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::new(0, 0, 0)
    }
}

fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let scaled = 1000.0 * 100.0 * covered as f64 / total as f64;
    ((scaled + 5.0) / 10.0).floor() / 100.0
}

/// The four metric groups without any per-line detail.
///
/// This is the shape exported to the raw-metrics side file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTotals {
    pub lines: Metric,
    pub statements: Metric,
    pub functions: Metric,
    pub branches: Metric,
}

impl MetricTotals {
    pub fn get(&self, kind: MetricKind) -> &Metric {
        match kind {
            MetricKind::Statements => &self.statements,
            MetricKind::Branches => &self.branches,
            MetricKind::Functions => &self.functions,
            MetricKind::Lines => &self.lines,
        }
    }

    pub fn merge(&self, other: &MetricTotals) -> MetricTotals {
        MetricTotals {
            lines: self.lines.merge(&other.lines),
            statements: self.statements.merge(&other.statements),
            functions: self.functions.merge(&other.functions),
            branches: self.branches.merge(&other.branches),
        }
    }
}

/// Metric totals plus the line hit map of a file.
///
/// Serialized flat: the four metric groups sit next to `linesCovered`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoverageMetricsRaw", into = "CoverageMetricsRaw")]
pub struct CoverageMetrics {
    pub totals: MetricTotals,
    /// Line number to hit count. Only file nodes carry entries.
    pub line_hits: BTreeMap<u32, u64>,
}

// Flat wire shape. `#[serde(flatten)]` would lose the integer line keys.
#[derive(Serialize, Deserialize)]
struct CoverageMetricsRaw {
    lines: Metric,
    statements: Metric,
    functions: Metric,
    branches: Metric,
    #[serde(
        default,
        rename = "linesCovered",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    line_hits: BTreeMap<u32, u64>,
}

impl From<CoverageMetricsRaw> for CoverageMetrics {
    fn from(raw: CoverageMetricsRaw) -> Self {
        Self {
            totals: MetricTotals {
                lines: raw.lines,
                statements: raw.statements,
                functions: raw.functions,
                branches: raw.branches,
            },
            line_hits: raw.line_hits,
        }
    }
}

impl From<CoverageMetrics> for CoverageMetricsRaw {
    fn from(metrics: CoverageMetrics) -> Self {
        Self {
            lines: metrics.totals.lines,
            statements: metrics.totals.statements,
            functions: metrics.totals.functions,
            branches: metrics.totals.branches,
            line_hits: metrics.line_hits,
        }
    }
}

impl CoverageMetrics {
    pub fn new(totals: MetricTotals) -> Self {
        Self {
            totals,
            line_hits: BTreeMap::new(),
        }
    }

    /// Uses the same counts for all four metric groups.
    pub fn uniform(metric: Metric) -> Self {
        Self::new(MetricTotals {
            lines: metric,
            statements: metric,
            functions: metric,
            branches: metric,
        })
    }

    pub fn with_line_hits(mut self, hits: impl IntoIterator<Item = (u32, u64)>) -> Self {
        self.line_hits.extend(hits);
        self
    }

    /// Lines with a zero hit count, in ascending line order.
    pub fn uncovered_lines(&self) -> Vec<u32> {
        self.line_hits
            .iter()
            .filter(|(_, hits)| **hits == 0)
            .map(|(line, _)| *line)
            .collect()
    }
}

/// One file or directory in the coverage tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageNode {
    /// Full relative path. Empty for a synthetic root.
    pub name: String,
    /// Name relative to the parent directory, used for display.
    #[serde(default)]
    pub relative_name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<CoverageNode>,
    pub metrics: CoverageMetrics,
    pub recursive_metrics: CoverageMetrics,
}

impl CoverageNode {
    /// A leaf file node. Its recursive metrics are its own metrics.
    pub fn file(name: impl Into<String>, metrics: CoverageMetrics) -> Self {
        let name = name.into();
        Self {
            relative_name: name.clone(),
            name,
            kind: NodeKind::File,
            children: Vec::new(),
            recursive_metrics: metrics.clone(),
            metrics,
        }
    }

    /// A directory node.
    ///
    /// Own metrics aggregate the files directly inside the directory, recursive
    /// metrics aggregate every child's recursive metrics. Children whose name
    /// starts with the directory name get that prefix stripped for display.
    pub fn dir(name: impl Into<String>, children: Vec<CoverageNode>) -> Self {
        let name = name.into();
        let mut own = MetricTotals::default();
        let mut recursive = MetricTotals::default();
        let children: Vec<CoverageNode> = children
            .into_iter()
            .map(|mut child| {
                if child.kind == NodeKind::File {
                    own = own.merge(&child.metrics.totals);
                }
                recursive = recursive.merge(&child.recursive_metrics.totals);
                child.relative_name = match child.name.strip_prefix(name.as_str()) {
                    Some(rest) if !rest.is_empty() => rest.to_string(),
                    _ => child.name.clone(),
                };
                child
            })
            .collect();

        Self {
            relative_name: name.clone(),
            name,
            kind: NodeKind::Dir,
            children,
            metrics: CoverageMetrics::new(own),
            recursive_metrics: CoverageMetrics::new(recursive),
        }
    }

    /// Parses a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::RenderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a tree from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, crate::RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Short display name, falling back to the full name and then to the
    /// root label.
    pub fn display_name(&self) -> &str {
        if !self.relative_name.is_empty() {
            &self.relative_name
        } else if !self.name.is_empty() {
            &self.name
        } else {
            ROOT_LABEL
        }
    }

    /// The metrics a table row shows for this node.
    pub fn row_metrics(&self) -> &CoverageMetrics {
        match self.kind {
            NodeKind::Dir => &self.recursive_metrics,
            NodeKind::File => &self.metrics,
        }
    }

    /// Number of path separators in the node name.
    ///
    /// A file sits at the depth of its directory: `src/` and `src/a.rs` are
    /// both 1.
    pub fn path_depth(&self) -> usize {
        self.name
            .chars()
            .filter(|c| *c == '/' || *c == std::path::MAIN_SEPARATOR)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stmts(total: u64, covered: u64) -> CoverageMetrics {
        CoverageMetrics::uniform(Metric::new(total, covered, 0))
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(Metric::new(3, 2, 0).pct, 66.67);
        assert_eq!(Metric::new(3, 1, 0).pct, 33.33);
        assert_eq!(Metric::new(20, 15, 0).pct, 75.0);
    }

    #[test]
    fn test_percent_of_empty_metric_is_full() {
        assert_eq!(Metric::new(0, 0, 0).pct, 100.0);
        assert_eq!(Metric::default().pct, 100.0);
    }

    #[test]
    fn test_merge_sums_counts() {
        let merged = Metric::new(10, 10, 1).merge(&Metric::new(10, 5, 2));
        assert_eq!(merged.total, 20);
        assert_eq!(merged.covered, 15);
        assert_eq!(merged.skipped, 3);
        assert_eq!(merged.pct, 75.0);
    }

    #[test]
    fn test_uncovered_lines_are_numeric_order() {
        let metrics = stmts(4, 2).with_line_hits([(10, 0), (2, 0), (5, 3), (1, 1)]);
        assert_eq!(metrics.uncovered_lines(), vec![2, 10]);
    }

    #[test]
    fn test_dir_aggregates_children() {
        let root = CoverageNode::dir(
            "",
            vec![
                CoverageNode::file("top.rs", stmts(4, 4)),
                CoverageNode::dir(
                    "src/",
                    vec![
                        CoverageNode::file("src/a.rs", stmts(10, 10)),
                        CoverageNode::file("src/b.rs", stmts(10, 5)),
                    ],
                ),
            ],
        );

        // Own metrics only see the file directly under the root.
        assert_eq!(root.metrics.totals.statements.total, 4);
        assert_eq!(root.recursive_metrics.totals.statements.total, 24);
        assert_eq!(root.recursive_metrics.totals.statements.covered, 19);
    }

    #[test]
    fn test_dir_strips_parent_prefix_for_display() {
        let dir = CoverageNode::dir("src/", vec![CoverageNode::file("src/a.rs", stmts(1, 1))]);
        assert_eq!(dir.children[0].display_name(), "a.rs");
        assert_eq!(dir.children[0].name, "src/a.rs");
    }

    #[test]
    fn test_display_name_of_unnamed_root() {
        let root = CoverageNode::dir("", vec![]);
        assert_eq!(root.display_name(), "All");
    }

    #[test]
    fn test_row_metrics_by_kind() {
        let dir = CoverageNode::dir(
            "lib/",
            vec![CoverageNode::dir(
                "lib/x/",
                vec![CoverageNode::file("lib/x/y.rs", stmts(8, 2))],
            )],
        );
        // Own metrics of lib/ see no files, the row still shows the subtree.
        assert_eq!(dir.metrics.totals.statements.total, 0);
        assert_eq!(dir.row_metrics().totals.statements.total, 8);
    }

    #[test]
    fn test_path_depth() {
        let node = |name: &str| CoverageNode::file(name, stmts(1, 1));
        assert_eq!(node("").path_depth(), 0);
        assert_eq!(node("main.rs").path_depth(), 0);
        assert_eq!(node("src/").path_depth(), 1);
        assert_eq!(node("src/a.rs").path_depth(), 1);
        assert_eq!(node("src/x/").path_depth(), 2);
        assert_eq!(node("src/x/a.rs").path_depth(), 2);
    }

    #[test]
    fn test_from_json_round_trips_line_hits() {
        let json = r#"{
            "name": "a.js",
            "kind": "file",
            "metrics": {
                "lines": {"total": 2, "covered": 1, "skipped": 0, "pct": 50},
                "statements": {"total": 2, "covered": 1, "skipped": 0, "pct": 50},
                "functions": {"total": 1, "covered": 1, "skipped": 0, "pct": 100},
                "branches": {"total": 0, "covered": 0, "skipped": 0, "pct": 100},
                "linesCovered": {"1": 1, "2": 0}
            },
            "recursiveMetrics": {
                "lines": {"total": 2, "covered": 1, "skipped": 0, "pct": 50},
                "statements": {"total": 2, "covered": 1, "skipped": 0, "pct": 50},
                "functions": {"total": 1, "covered": 1, "skipped": 0, "pct": 100},
                "branches": {"total": 0, "covered": 0, "skipped": 0, "pct": 100}
            }
        }"#;
        let node = CoverageNode::from_json(json).unwrap();
        assert_eq!(node.kind, NodeKind::File);
        assert_eq!(node.metrics.uncovered_lines(), vec![2]);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_from_json_rejects_missing_metric_group() {
        let json = r#"{
            "name": "a.js",
            "kind": "file",
            "metrics": {
                "lines": {"total": 2, "covered": 1, "skipped": 0, "pct": 50}
            },
            "recursiveMetrics": {
                "lines": {"total": 2, "covered": 1, "skipped": 0, "pct": 50}
            }
        }"#;
        assert!(CoverageNode::from_json(json).is_err());
    }
}

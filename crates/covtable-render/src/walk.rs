//! Tree walk: filters, row order and raw-metrics capture.
//!
//! The root is rendered as a banner (separator, header, separator) before its
//! children and as a totals block (separator, totals row, separator) after
//! them. Every other node is tested against the active filters and gets a row
//! only when all of them pass. Filters apply to single nodes: the children of
//! a hidden node are still visited.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cell::CellFormatter;
use crate::classify::{Classify, Watermarks};
use crate::layout::TableLayout;
use crate::model::{CoverageNode, MetricTotals, NodeKind};
use crate::palette::{Palette, TextMode};
use crate::row::RowBuilder;

/// Inputs of one render call.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Restricts rows to one node kind. `Some(Dir)` also drops the
    /// uncovered-lines column.
    pub kind: Option<NodeKind>,
    /// Maximum path depth shown; zero or negative is unlimited.
    pub depth: i64,
    /// Substring a node path must contain to be shown.
    pub pattern: Option<String>,
    /// Total line width budget; zero is unlimited.
    pub max_cols: usize,
    /// Collect the metrics of every emitted row.
    pub capture_raw: bool,
    pub watermarks: Watermarks,
    pub text_mode: TextMode,
}

impl RenderOptions {
    pub fn depth_limit(&self) -> Option<usize> {
        usize::try_from(self.depth).ok().filter(|depth| *depth > 0)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    /// True when `node` passes every active filter.
    pub fn admits(&self, node: &CoverageNode) -> bool {
        let unnamed = node.name.is_empty();
        let depth_ok = match self.depth_limit() {
            Some(limit) => unnamed || node.path_depth() <= limit,
            None => true,
        };
        let match_ok = match self.pattern() {
            Some(pattern) => unnamed || node.name.contains(pattern),
            None => true,
        };
        let kind_ok = self.kind.map_or(true, |kind| node.kind == kind);
        depth_ok && match_ok && kind_ok
    }
}

/// Metrics of emitted rows keyed by display name, in row order.
///
/// Serializes as a JSON object. A repeated name keeps its first position and
/// takes the latest value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMetrics {
    entries: Vec<(String, MetricTotals)>,
}

impl RawMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, totals: MetricTotals) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = totals,
            None => self.entries.push((name, totals)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricTotals> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, totals)| totals)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricTotals)> {
        self.entries.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    /// Compact JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for RawMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, totals) in &self.entries {
            map.serialize_entry(name, totals)?;
        }
        map.end()
    }
}

/// Output of a render call.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedTable {
    pub lines: Vec<String>,
    /// Planned width of the name column.
    pub name_width: usize,
    /// Data rows emitted below the root, totals excluded.
    pub rows: usize,
    /// Present when capture was requested.
    pub raw_metrics: Option<RawMetrics>,
}

impl RenderedTable {
    /// Lines joined by newlines, with one trailing newline.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Renders a coverage tree with a palette and a classifier.
pub struct TableRenderer<'a> {
    options: &'a RenderOptions,
    palette: &'a Palette,
    classifier: &'a dyn Classify,
}

impl<'a> TableRenderer<'a> {
    /// Classifies with the watermarks carried by `options`.
    pub fn new(options: &'a RenderOptions, palette: &'a Palette) -> Self {
        Self {
            options,
            palette,
            classifier: &options.watermarks,
        }
    }

    pub fn with_classifier(mut self, classifier: &'a dyn Classify) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn render(&self, root: &CoverageNode) -> RenderedTable {
        let layout = TableLayout::plan(root, self.options.kind, self.options.max_cols);
        let rows = RowBuilder::new(
            layout,
            CellFormatter::new(self.palette, self.options.text_mode),
            self.classifier,
        );

        let mut walk = Walk {
            options: self.options,
            rows: &rows,
            lines: Vec::new(),
            emitted: 0,
            raw: self.options.capture_raw.then(RawMetrics::new),
        };
        walk.visit(root, 0);

        RenderedTable {
            lines: walk.lines,
            name_width: layout.name_width,
            rows: walk.emitted,
            raw_metrics: walk.raw,
        }
    }
}

/// Renders `root` classified by `options.watermarks`.
pub fn render_table(root: &CoverageNode, options: &RenderOptions, palette: &Palette) -> RenderedTable {
    TableRenderer::new(options, palette).render(root)
}

struct Walk<'r, 'a> {
    options: &'r RenderOptions,
    rows: &'r RowBuilder<'a>,
    lines: Vec<String>,
    emitted: usize,
    raw: Option<RawMetrics>,
}

impl Walk<'_, '_> {
    fn visit(&mut self, node: &CoverageNode, level: usize) {
        if level == 0 {
            let separator = self.rows.separator();
            self.lines.push(separator.clone());
            self.lines.push(self.rows.header());
            self.lines.push(separator);
        } else if self.options.admits(node) {
            self.lines.push(self.rows.row(node, level));
            self.emitted += 1;
            if let Some(raw) = self.raw.as_mut() {
                raw.insert(node.display_name(), node.row_metrics().totals);
            }
        }

        for child in &node.children {
            self.visit(child, level + 1);
        }

        if level == 0 {
            let separator = self.rows.separator();
            self.lines.push(separator.clone());
            self.lines.push(self.rows.row(node, 0));
            self.lines.push(separator);
        }
    }
}

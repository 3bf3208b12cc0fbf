//! # covtable-render
//!
//! Fixed-width coverage tables for terminals and text files.
//!
//! The crate turns a [`CoverageNode`] tree into the lines of a table with one
//! row per directory or file, four percentage columns (statements, branches,
//! functions, lines) and, for file tables, the list of uncovered lines:
//!
//! ```text
//! --------|----------|----------|----------|----------|----------------|
//! File    |  % Stmts | % Branch |  % Funcs |  % Lines |Uncovered Lines |
//! --------|----------|----------|----------|----------|----------------|
//!  src/   |       75 |       75 |       75 |       75 |                |
//!   a.js  |      100 |      100 |      100 |      100 |                |
//!   b.js  |       50 |       50 |       50 |       50 |            3,7 |
//! --------|----------|----------|----------|----------|----------------|
//! All     |       75 |       75 |       75 |       75 |                |
//! --------|----------|----------|----------|----------|----------------|
//! ```
//!
//! ## Pieces
//!
//! - [`cell`]: padding and tail-preserving truncation to an exact width
//! - [`layout`]: name column sizing under an optional width budget
//! - [`row`]: header, separator and data rows
//! - [`walk`]: tree traversal with depth, substring and kind filters
//! - [`classify`] and [`palette`]: watermark labels and their styles
//!
//! Nothing here touches the filesystem. Writing the text somewhere is the
//! caller's job.
//!
//! ```rust
//! use covtable_render::{render_table, CoverageMetrics, CoverageNode, Metric, Palette, RenderOptions};
//!
//! let root = CoverageNode::dir(
//!     "",
//!     vec![CoverageNode::file("a.js", CoverageMetrics::uniform(Metric::new(4, 3, 0)))],
//! );
//! let table = render_table(&root, &RenderOptions::default(), &Palette::default());
//! assert!(table.lines[3].starts_with(" a.js |       75 |"));
//! ```

pub mod cell;
pub mod classify;
mod error;
pub mod layout;
mod model;
pub mod palette;
pub mod row;
pub mod walk;

pub use classify::{Classification, Classify, Watermark, Watermarks};
pub use error::RenderError;
pub use layout::TableLayout;
pub use model::{
    CoverageMetrics, CoverageNode, Metric, MetricKind, MetricTotals, NodeKind,
};
pub use palette::{ColorChoice, Palette, TextMode};
pub use row::RowBuilder;
pub use walk::{render_table, RawMetrics, RenderOptions, RenderedTable, TableRenderer};

//! # covtable
//!
//! Text coverage reports for a summarized coverage tree.
//!
//! Two report types are available:
//!
//! | Type | Rows | Extra output |
//! |------|------|--------------|
//! | `text` | every directory and file, with uncovered lines | none |
//! | `text-folders` | directories only | JSON metrics per directory (`folder-summary.json`) |
//!
//! The table goes to the console unless a file name is configured. Files are
//! written atomically, creating the report directory when needed.
//!
//! ```rust,no_run
//! use covtable::{create_report, CoverageMetrics, CoverageNode, Metric, ReportConfig};
//!
//! let root = CoverageNode::dir(
//!     "",
//!     vec![CoverageNode::file("src/lib.rs", CoverageMetrics::uniform(Metric::new(10, 8, 0)))],
//! );
//! let config = ReportConfig::default().with_dir("coverage").with_file("coverage.txt");
//! let report = create_report("text", config)?;
//! let done = report.write_report(&root)?;
//! assert_eq!(done.written.len(), 1);
//! # Ok::<(), covtable::ReportError>(())
//! ```
//!
//! Rendering lives in `covtable-render`, re-exported here.

mod config;
mod error;
mod hooks;
mod input;
mod output;
mod report;

pub use config::{ReportConfig, DEFAULT_SUMMARY_FILE};
pub use error::ReportError;
pub use hooks::{DoneFn, Hooks, ReportDone};
pub use input::{load_palette, load_tree};
pub use output::{write_atomic, OutputDestination};
pub use report::{create_report, Reporter, TextFoldersReport, TextReport, REPORT_TYPES};

pub use covtable_render::{
    render_table, Classification, ColorChoice, CoverageMetrics, CoverageNode, Metric, MetricKind,
    MetricTotals, NodeKind, Palette, RawMetrics, RenderError, RenderOptions, RenderedTable, TextMode,
    Watermark, Watermarks,
};

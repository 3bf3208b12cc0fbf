//! The `text` and `text-folders` reports.
//!
//! [`TextReport`] prints one row per directory and file. [`TextFoldersReport`]
//! restricts the table to directories and also writes the metrics of every
//! shown directory to a JSON file, whether the table itself goes to the
//! console or to a file.

use covtable_render::{render_table, CoverageNode, NodeKind, Palette, RenderedTable};
use log::{debug, info};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::hooks::{Hooks, ReportDone};
use crate::output::write_atomic;

/// Behavior shared by every report variant.
pub trait Reporter {
    /// Registry name of the report.
    fn report_type(&self) -> &'static str;

    /// One-line description.
    fn synopsis(&self) -> &'static str;

    fn config(&self) -> &ReportConfig;

    /// Renders the table without writing anything.
    fn render(&self, root: &CoverageNode) -> RenderedTable;

    /// Renders and writes every output of the report, then runs the
    /// completion hooks.
    fn write_report(&self, root: &CoverageNode) -> Result<ReportDone, ReportError>;
}

/// Report names accepted by [`create_report`].
pub const REPORT_TYPES: [&str; 2] = [TextReport::TYPE, TextFoldersReport::TYPE];

/// Builds a report by registry name.
pub fn create_report(
    report_type: &str,
    config: ReportConfig,
) -> Result<Box<dyn Reporter>, ReportError> {
    match report_type {
        TextReport::TYPE => Ok(Box::new(TextReport::new(config)?)),
        TextFoldersReport::TYPE => Ok(Box::new(TextFoldersReport::new(config)?)),
        other => Err(ReportError::UnknownReport(other.to_string())),
    }
}

/// A row for every directory and file, typically printed to the console.
#[derive(Debug, Clone)]
pub struct TextReport {
    config: ReportConfig,
    palette: Palette,
    hooks: Hooks,
}

impl TextReport {
    pub const TYPE: &'static str = "text";

    /// Validates `config` and builds the report with the default palette.
    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        Ok(Self {
            config,
            palette: Palette::default(),
            hooks: Hooks::new(),
        })
    }

    /// Console output, width sized to content.
    pub fn default_config() -> ReportConfig {
        ReportConfig::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub(crate) fn render_kind(
        &self,
        root: &CoverageNode,
        kind: Option<NodeKind>,
        capture_raw: bool,
    ) -> RenderedTable {
        let options = self.config.render_options(kind, capture_raw);
        let table = render_table(root, &options, &self.palette);
        debug!(
            "planned name column of {} for {} rows",
            table.name_width, table.rows
        );
        table
    }

    /// Writes the table to the configured destination.
    pub(crate) fn write_table(
        &self,
        table: &RenderedTable,
        report_type: &'static str,
    ) -> Result<ReportDone, ReportError> {
        let destination = self.config.destination();
        let mut done = ReportDone::new(report_type);
        done.console = destination.is_console();
        if let Some(path) = destination.write_text(&table.to_text())? {
            info!("{} report written to {}", report_type, path.display());
            done.written.push(path);
        }
        Ok(done)
    }

    pub(crate) fn hooks(&self) -> &Hooks {
        &self.hooks
    }
}

impl Reporter for TextReport {
    fn report_type(&self) -> &'static str {
        Self::TYPE
    }

    fn synopsis(&self) -> &'static str {
        "text report that prints a coverage line for every file, typically to console"
    }

    fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn render(&self, root: &CoverageNode) -> RenderedTable {
        self.render_kind(root, None, false)
    }

    fn write_report(&self, root: &CoverageNode) -> Result<ReportDone, ReportError> {
        let table = self.render(root);
        let done = self.write_table(&table, Self::TYPE)?;
        self.hooks.run_done(&done);
        Ok(done)
    }
}

/// A row for every directory, plus a JSON file of their metrics.
#[derive(Debug, Clone)]
pub struct TextFoldersReport {
    text: TextReport,
}

impl TextFoldersReport {
    pub const TYPE: &'static str = "text-folders";

    pub fn new(config: ReportConfig) -> Result<Self, ReportError> {
        Ok(Self {
            text: TextReport::new(config)?,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.text = self.text.with_palette(palette);
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.text = self.text.with_hooks(hooks);
        self
    }
}

impl Reporter for TextFoldersReport {
    fn report_type(&self) -> &'static str {
        Self::TYPE
    }

    fn synopsis(&self) -> &'static str {
        "text report that prints a coverage line for every folder, to console and as JSON file"
    }

    fn config(&self) -> &ReportConfig {
        self.text.config()
    }

    fn render(&self, root: &CoverageNode) -> RenderedTable {
        self.text.render_kind(root, Some(NodeKind::Dir), true)
    }

    fn write_report(&self, root: &CoverageNode) -> Result<ReportDone, ReportError> {
        let table = self.render(root);
        let mut done = self.text.write_table(&table, Self::TYPE)?;

        let raw = table.raw_metrics.unwrap_or_default();
        let json = raw.to_json()?;
        let path = self.config().summary_path();
        write_atomic(&path, json.as_bytes())?;
        info!(
            "metrics of {} folders written to {}",
            raw.len(),
            path.display()
        );
        done.written.push(path);

        self.text.hooks().run_done(&done);
        Ok(done)
    }
}

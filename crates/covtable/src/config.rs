//! Report configuration.
//!
//! Every field is optional. A configuration can be read from YAML or JSON:
//!
//! ```yaml
//! dir: coverage
//! file: coverage.txt
//! maxCols: 100
//! depth: 2
//! match: src/
//! watermarks:
//!   statements: [60, 90]
//! color: never
//! ```
//!
//! or built in code:
//!
//! ```rust
//! use covtable::ReportConfig;
//!
//! let config = ReportConfig::default()
//!     .with_dir("coverage")
//!     .with_file("coverage.txt")
//!     .with_max_cols(100);
//! assert!(config.validate().is_ok());
//! ```

use std::path::{Path, PathBuf};

use covtable_render::{ColorChoice, NodeKind, RenderOptions, TextMode, Watermarks};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::output::OutputDestination;

/// File name of the folder report's raw-metrics side file.
pub const DEFAULT_SUMMARY_FILE: &str = "folder-summary.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory report files are written to.
    pub dir: PathBuf,
    /// Text report file name; the console when absent.
    pub file: Option<String>,
    /// Name of the raw-metrics JSON file written by the folder report.
    #[serde(alias = "summaryFile")]
    pub summary_file: Option<String>,
    /// Total width budget; 0 sizes the table to its content.
    #[serde(alias = "maxCols")]
    pub max_cols: usize,
    /// Deepest path shown; 0 or negative shows everything.
    pub depth: i64,
    /// Only show nodes whose path contains this text.
    #[serde(rename = "match")]
    pub pattern: Option<String>,
    pub watermarks: Watermarks,
    pub color: ColorChoice,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            file: None,
            summary_file: None,
            max_cols: 0,
            depth: 0,
            pattern: None,
            watermarks: Watermarks::default(),
            color: ColorChoice::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ReportError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a `.json` file as JSON and anything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_summary_file(mut self, file: impl Into<String>) -> Self {
        self.summary_file = Some(file.into());
        self
    }

    pub fn with_max_cols(mut self, max_cols: usize) -> Self {
        self.max_cols = max_cols;
        self
    }

    pub fn with_depth(mut self, depth: i64) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_watermarks(mut self, watermarks: Watermarks) -> Self {
        self.watermarks = watermarks;
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Checks the configuration before anything is rendered.
    pub fn validate(&self) -> Result<(), ReportError> {
        if let Some(kind) = self.watermarks.first_invalid() {
            let mark = self.watermarks.get(kind);
            return Err(ReportError::Config(format!(
                "{} watermark [{}, {}] must satisfy 0 <= low <= high <= 100",
                kind.as_str(),
                mark.low,
                mark.high
            )));
        }
        if matches!(self.file.as_deref(), Some("")) {
            return Err(ReportError::Config("file must not be empty".into()));
        }
        if matches!(self.summary_file.as_deref(), Some("")) {
            return Err(ReportError::Config("summaryFile must not be empty".into()));
        }
        Ok(())
    }

    /// Where the text table goes.
    pub fn destination(&self) -> OutputDestination {
        match &self.file {
            Some(file) => OutputDestination::File(self.dir.join(file)),
            None => OutputDestination::Stdout,
        }
    }

    /// Path of the folder report's raw-metrics file.
    pub fn summary_path(&self) -> PathBuf {
        let name = self.summary_file.as_deref().unwrap_or(DEFAULT_SUMMARY_FILE);
        self.dir.join(name)
    }

    /// Engine options for one table.
    pub fn render_options(&self, kind: Option<NodeKind>, capture_raw: bool) -> RenderOptions {
        let text_mode: TextMode = self.color.resolve(self.destination().is_console());
        RenderOptions {
            kind,
            depth: self.depth,
            pattern: self.pattern.clone(),
            max_cols: self.max_cols,
            capture_raw,
            watermarks: self.watermarks,
            text_mode,
        }
    }
}

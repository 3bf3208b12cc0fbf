//! Error type for report generation.

use std::path::PathBuf;

use covtable_render::RenderError;
use thiserror::Error;

/// Errors raised while configuring or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Creating a directory or writing a file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to standard output failed.
    #[error("failed to write report to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    /// Reading a configuration, tree or palette file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unknown report type: {0}")]
    UnknownReport(String),

    /// A tree or palette file could not be parsed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

//! Where report text ends up.
//!
//! Files are written atomically: the content goes to a temporary file in the
//! target directory, which is then renamed over the destination. A failed
//! write leaves either the previous file or nothing, never a partial report.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use crate::error::ReportError;

/// Destination for rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    /// Write to standard output
    Stdout,
    /// Write to a specific file, creating its directory
    File(PathBuf),
}

impl OutputDestination {
    pub fn is_console(&self) -> bool {
        matches!(self, OutputDestination::Stdout)
    }

    /// Writes text content to this destination.
    ///
    /// The text is written as given; no newline is added. Returns the path
    /// written to, if any.
    pub fn write_text(&self, content: &str) -> Result<Option<PathBuf>, ReportError> {
        match self {
            OutputDestination::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(content.as_bytes())
                    .and_then(|_| handle.flush())
                    .map_err(ReportError::Stdout)?;
                Ok(None)
            }
            OutputDestination::File(path) => {
                write_atomic(path, content.as_bytes())?;
                Ok(Some(path.clone()))
            }
        }
    }
}

/// Creates the parent directory of `path`, then replaces `path` with
/// `content` through a temporary sibling file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| ReportError::io(parent, e))?;
    tmp.write_all(content)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| ReportError::io(path, e))?;
    tmp.persist(path).map_err(|e| ReportError::io(path, e.error))?;

    debug!("wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

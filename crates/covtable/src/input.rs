//! Loading coverage trees and palettes from disk.
//!
//! Both readers pick the format by extension: `.json` is parsed as JSON,
//! anything else as YAML.

use std::path::Path;

use covtable_render::{CoverageNode, Palette};

use crate::error::ReportError;

fn read(path: &Path) -> Result<String, ReportError> {
    std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("json")
}

/// Reads a summarized coverage tree.
pub fn load_tree(path: impl AsRef<Path>) -> Result<CoverageNode, ReportError> {
    let path = path.as_ref();
    let content = read(path)?;
    let tree = if is_json(path) {
        CoverageNode::from_json(&content)?
    } else {
        CoverageNode::from_yaml(&content)?
    };
    Ok(tree)
}

/// Reads a YAML palette mapping class names to dotted styles.
pub fn load_palette(path: impl AsRef<Path>) -> Result<Palette, ReportError> {
    let path = path.as_ref();
    Ok(Palette::from_yaml(&read(path)?)?)
}

//! Error type for loading trees and palettes.
//!
//! Rendering itself cannot fail: every cell has a defined output for every
//! width. Errors only come from parsing input documents.

use std::fmt;

/// Error type for the fallible parts of the engine.
#[derive(Debug)]
pub enum RenderError {
    /// A tree or palette document could not be parsed.
    ParseError(String),

    /// A palette names a classification that does not exist.
    UnknownClass(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::ParseError(msg) => write!(f, "parse error: {}", msg),
            RenderError::UnknownClass(name) => write!(f, "unknown classification: {}", name),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::ParseError(err.to_string())
    }
}

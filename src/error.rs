//! Error types for slicing an OpenAPI document

use std::fmt;
use thiserror::Error;

/// Result type alias for slicing operations
pub type SliceResult<T> = std::result::Result<T, SliceError>;

/// What a selector refers to in the source document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Tag,
    Path,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorKind::Tag => write!(f, "tags"),
            SelectorKind::Path => write!(f, "paths"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SliceError {
    #[error("No selection given: pass one or more tags with --modules or routes with --paths")]
    NoSelection,

    #[error("--modules and --paths cannot be used together")]
    ConflictingSelection,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch OpenAPI document: {0}")]
    FetchError(String),

    #[error("Invalid OpenAPI document: {0}")]
    InvalidFormat(String),

    #[error("The following {kind} do not exist in the document: {}", .names.join(", "))]
    UnknownSelectors { kind: SelectorKind, names: Vec<String> },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while parsing stack-trace text
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid {field} '{value}' on stack line {line_index}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        line_index: usize,
    },
}

/// Errors raised by the source map decoder
#[derive(Error, Debug)]
pub enum SourceMapError {
    #[error("Invalid source map JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unsupported source map version: expected 3, got {0}")]
    UnsupportedVersion(u32),

    #[error("Indexed source maps (sections) are not supported")]
    IndexedMap,

    #[error("Invalid VLQ character: {0:?}")]
    InvalidVlqChar(char),

    #[error("VLQ value overflows in segment '{0}'")]
    VlqOverflow(String),

    #[error("Mapping position {position} overflows when adding {delta}")]
    PositionOverflow { position: i64, delta: i64 },

    #[error("Invalid source index: {0}")]
    InvalidSourceIndex(i64),

    #[error("Invalid name index: {0}")]
    InvalidNameIndex(i64),

    #[error("Invalid original position {line}:{column}")]
    InvalidOriginalPosition { line: i64, column: i64 },

    #[error("Line numbers must be >= 1, got {0:?}")]
    InvalidLine(Option<u32>),
}

/// Errors that can occur while mapping frames
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Cannot read source map directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not parseable: cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not parseable: {path}: {source}")]
    NotParseable {
        path: PathBuf,
        #[source]
        source: SourceMapError,
    },

    #[error("Position lookup failed: {0}")]
    Lookup(#[source] SourceMapError),

    #[error("Failed to parse stack trace: {0}")]
    Parse(#[from] ParseError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Unsupported frame document version: {0}")]
    UnsupportedVersion(String),
}

//! JSON frame document writer and reader.
//!
//! Frames (raw or mapped) are stored as a versioned document so a trace can
//! be parsed once and mapped again later.

use crate::utils::config::FRAMES_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDocument<T> {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the document was generated
    pub generated_at: String,

    pub frames: Vec<T>,
}

impl<T> FrameDocument<T> {
    pub fn new(frames: Vec<T>) -> Self {
        Self {
            version: FRAMES_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            frames,
        }
    }
}

/// Write frames to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_frames<T: Serialize>(
    frames: &[T],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} frames to: {}",
        frames.len(),
        output_path.display()
    );

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    let document = FrameDocument::new(frames.iter().collect::<Vec<_>>());
    serde_json::to_writer_pretty(writer, &document)
        .map_err(OutputError::SerializationFailed)?;

    info!(
        "Frames written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render frames as a pretty JSON document
pub fn frames_to_string<T: Serialize>(frames: &[T]) -> Result<String, OutputError> {
    serde_json::to_string_pretty(&FrameDocument::new(frames.iter().collect::<Vec<_>>()))
        .map_err(OutputError::SerializationFailed)
}

/// Read frames back from a JSON document
///
/// **Public** - accepts documents written by write_frames
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
/// * `OutputError::UnsupportedVersion` - Document from an unknown schema
pub fn read_frames<T: DeserializeOwned>(
    input_path: impl AsRef<Path>,
) -> Result<Vec<T>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading frames from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: FrameDocument<T> =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    if document.version != FRAMES_SCHEMA_VERSION {
        return Err(OutputError::UnsupportedVersion(document.version));
    }

    debug!(
        "Loaded {} frames (generated {})",
        document.frames.len(),
        document.generated_at
    );

    Ok(document.frames)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

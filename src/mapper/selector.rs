//! Map file selection.
//!
//! Picks, for one frame, the source map in the map directory that most
//! likely describes the frame's generated file.

use super::options::MappingOptions;
use crate::parser::schema::StackFrame;
use crate::utils::config::MAP_FILE_SUFFIX;
use crate::utils::error::MapError;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// List the source map files directly inside `directory`
///
/// **Public** - enumerated once per mapping run
///
/// Names are sorted so prefix ties resolve the same way on every filesystem.
///
/// # Errors
/// * `MapError::DirectoryRead` - Directory missing or unreadable
pub fn list_map_files(directory: &Path) -> Result<Vec<String>, MapError> {
    let directory_error = |source: std::io::Error| MapError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory).map_err(directory_error)? {
        let entry = entry.map_err(directory_error)?;

        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.ends_with(MAP_FILE_SUFFIX) {
            candidates.push(name);
        }
    }

    candidates.sort();
    debug!(
        "Found {} source map files in {}",
        candidates.len(),
        directory.display()
    );

    Ok(candidates)
}

/// Choose the map file for `frame`, or none
///
/// **Public** - strict mode wants exactly `<key>.map`; fuzzy mode takes the
/// candidate sharing the longest leading run of characters with the key
pub fn select_map_file<'a>(
    frame: &StackFrame,
    candidates: &'a [String],
    options: &MappingOptions,
) -> Option<&'a str> {
    let key = frame.file_key()?;

    let selected = if options.strict_matching {
        let wanted = format!("{key}{MAP_FILE_SUFFIX}");
        candidates.iter().find(|c| **c == wanted).map(String::as_str)
    } else {
        best_prefix_match(key, candidates)
    };

    match selected {
        Some(file) => debug!("Frame file {} -> {}", key, file),
        None => warn!("No matching source map file found for {}", key),
    }

    selected
}

/// Highest shared-prefix candidate; ties keep the first seen, zero never matches
///
/// **Private** - fuzzy branch of select_map_file
fn best_prefix_match<'a>(key: &str, candidates: &'a [String]) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        let score = common_prefix_len(key, candidate);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((candidate.as_str(), score));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Number of leading characters `a` and `b` have in common
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

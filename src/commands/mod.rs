//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components to perform user tasks.

pub mod map;
pub mod parse;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

// Re-export main command functions
pub use map::{execute_map, validate_args, MapArgs, MapInput};
pub use parse::{execute_parse, ParseArgs};

/// Read stack-trace text from a file, or from stdin when no path is given
pub(crate) fn read_trace(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stack trace from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stack trace from stdin")?;
            Ok(text)
        }
    }
}

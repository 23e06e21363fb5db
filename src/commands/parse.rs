//! Parse command implementation.
//!
//! Turns stack-trace text into a JSON frame document, so the same trace can
//! be mapped repeatedly with `map --frames`.

use super::read_trace;
use crate::output::{frames_to_string, write_frames};
use crate::parser::parse_stack_trace;
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the parse command
#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    /// Stack-trace text file; `None` reads stdin
    pub trace: Option<PathBuf>,

    /// Where to write the frame document; `None` prints it
    pub output: Option<PathBuf>,
}

/// Execute the parse command
pub fn execute_parse(args: ParseArgs) -> Result<()> {
    let text = read_trace(args.trace.as_deref())?;
    let frames = parse_stack_trace(&text)
        .context("Failed to parse stack trace")?;

    info!("Parsed {} frames", frames.len());

    match &args.output {
        Some(output) => {
            write_frames(&frames, output)
                .context("Failed to write frames")?;
            info!("✓ Frames written to: {}", output.display());
        }
        None => println!("{}", frames_to_string(&frames)?),
    }

    Ok(())
}

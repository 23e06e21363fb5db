//! Map command implementation.
//!
//! The map command:
//! 1. Reads the stack trace (text file, stdin, or a JSON frame document)
//! 2. Lists the source map directory
//! 3. Resolves every frame it can
//! 4. Prints the mapped trace or writes it as JSON

use super::read_trace;
use crate::mapper::{map_stack_frames, map_stack_trace, MappingOptions};
use crate::output::{read_frames, serialize_frames, write_frames};
use crate::parser::{parse_stack_trace, StackFrame};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Largest snippet radius the CLI accepts
const MAX_SNIPPET_RADIUS: usize = 500;

/// Where the frames to map come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapInput {
    /// Raw stack-trace text; `None` reads stdin
    Trace(Option<PathBuf>),
    /// JSON frame document written by the parse command
    Frames(PathBuf),
}

/// Arguments for the map command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct MapArgs {
    /// Directory holding the `.map` files
    pub maps_dir: PathBuf,

    pub input: MapInput,

    pub options: MappingOptions,

    /// Write mapped frames as JSON instead of printing text
    pub output_json: Option<PathBuf>,
}

impl Default for MapArgs {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("."),
            input: MapInput::Trace(None),
            options: MappingOptions::default(),
            output_json: None,
        }
    }
}

/// Execute the map command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable input or map directory
/// * Malformed stack-trace text
/// * File write errors
pub fn execute_map(args: MapArgs) -> Result<()> {
    let start_time = Instant::now();

    info!(
        "Mapping against source maps in: {}",
        args.maps_dir.display()
    );

    match &args.input {
        MapInput::Trace(path) => {
            let text = read_trace(path.as_deref())?;

            if let Some(output) = &args.output_json {
                let frames = parse_stack_trace(&text)
                    .context("Failed to parse stack trace")?;
                let mapped = map_stack_frames(&frames, &args.maps_dir, &args.options)
                    .context("Failed to map stack frames")?;
                write_frames(&mapped, output)
                    .context("Failed to write mapped frames")?;
                info!("✓ Mapped frames written to: {}", output.display());
            } else {
                let mapped = map_stack_trace(&text, &args.maps_dir, &args.options)
                    .context("Failed to map stack trace")?;
                println!("{}", mapped);
            }
        }

        MapInput::Frames(path) => {
            let frames: Vec<StackFrame> = read_frames(path)
                .with_context(|| format!("Failed to read frames from {}", path.display()))?;
            let mapped = map_stack_frames(&frames, &args.maps_dir, &args.options)
                .context("Failed to map stack frames")?;

            match &args.output_json {
                Some(output) => {
                    write_frames(&mapped, output)
                        .context("Failed to write mapped frames")?;
                    info!("✓ Mapped frames written to: {}", output.display());
                }
                None => println!("{}", serialize_frames(&mapped)),
            }
        }
    }

    info!(
        "Mapping completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Validate map arguments
///
/// **Public** - can be called before execute_map for early validation
pub fn validate_args(args: &MapArgs) -> Result<()> {
    if args.maps_dir.as_os_str().is_empty() {
        anyhow::bail!("Source map directory cannot be empty");
    }

    if !args.maps_dir.is_dir() {
        anyhow::bail!(
            "Source map directory does not exist: {}",
            args.maps_dir.display()
        );
    }

    match &args.input {
        MapInput::Trace(Some(path)) | MapInput::Frames(path) if !path.is_file() => {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }
        _ => {}
    }

    if args.options.snippet_radius > MAX_SNIPPET_RADIUS {
        anyhow::bail!("Snippet radius is too large (max {})", MAX_SNIPPET_RADIUS);
    }

    Ok(())
}

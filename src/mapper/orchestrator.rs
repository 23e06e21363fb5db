//! Mapping run orchestration.
//!
//! A run:
//! 1. Parses the stack trace (text entry point only)
//! 2. Lists the map directory once
//! 3. Selects and resolves a map file for every frame, in order
//! 4. Drops frames that found no map or failed to resolve
//! 5. Renders the survivors back to text (text entry point only)

use super::options::MappingOptions;
use super::resolver::resolve_frame;
use super::selector::{list_map_files, select_map_file};
use crate::output::text::{describe_stack_frame, serialize_frames};
use crate::parser::schema::{MappedFrame, StackFrame};
use crate::parser::stack_trace::parse_stack_trace;
use crate::utils::error::MapError;
use log::{error, info};
use std::path::Path;

/// What happened to one input frame
#[derive(Debug)]
pub enum FrameOutcome {
    /// Resolved to an original position
    Mapped(MappedFrame),
    /// No map file in the directory matched the frame's file
    Unmatched,
    /// A map file matched but could not be used
    Failed(MapError),
}

impl FrameOutcome {
    pub fn mapped(&self) -> Option<&MappedFrame> {
        match self {
            FrameOutcome::Mapped(frame) => Some(frame),
            _ => None,
        }
    }

    pub fn into_mapped(self) -> Option<MappedFrame> {
        match self {
            FrameOutcome::Mapped(frame) => Some(frame),
            _ => None,
        }
    }
}

/// Map a textual stack trace and render the result as text
///
/// **Public** - text in, text out
///
/// # Errors
/// * `MapError::Parse` - Stack trace text cannot be parsed
/// * `MapError::DirectoryRead` - Map directory cannot be listed
pub fn map_stack_trace(
    stack_trace: &str,
    source_map_location: impl AsRef<Path>,
    options: &MappingOptions,
) -> Result<String, MapError> {
    let frames = parse_stack_trace(stack_trace)?;
    let mapped = map_stack_frames(&frames, source_map_location, options)?;

    Ok(serialize_frames(&mapped))
}

/// Map parsed frames, keeping only the ones that resolved
///
/// **Public** - frames in, frames out
///
/// # Errors
/// * `MapError::DirectoryRead` - Map directory cannot be listed
pub fn map_stack_frames(
    frames: &[StackFrame],
    source_map_location: impl AsRef<Path>,
    options: &MappingOptions,
) -> Result<Vec<MappedFrame>, MapError> {
    let outcomes = map_frames_with_outcomes(frames, source_map_location, options)?;

    Ok(outcomes
        .into_iter()
        .filter_map(|(_, outcome)| outcome.into_mapped())
        .collect())
}

/// Map parsed frames and report the outcome of every one of them
///
/// **Public** - same run as map_stack_frames, with drops made visible
///
/// Frames are processed strictly in order; a frame's failure is logged and
/// recorded but never stops the run.
pub fn map_frames_with_outcomes<'a>(
    frames: &'a [StackFrame],
    source_map_location: impl AsRef<Path>,
    options: &MappingOptions,
) -> Result<Vec<(&'a StackFrame, FrameOutcome)>, MapError> {
    let base_directory = source_map_location.as_ref();
    let candidates = list_map_files(base_directory)?;

    let mut outcomes = Vec::with_capacity(frames.len());
    for frame in frames {
        let outcome = match select_map_file(frame, &candidates, options) {
            None => FrameOutcome::Unmatched,
            Some(map_file) => match resolve_frame(frame, map_file, base_directory, options) {
                Ok(mapped) => FrameOutcome::Mapped(mapped),
                Err(e) => {
                    error!(
                        "Error mapping stack frame {}: {}",
                        describe_stack_frame(frame),
                        e
                    );
                    FrameOutcome::Failed(e)
                }
            },
        };
        outcomes.push((frame, outcome));
    }

    let mapped = outcomes.iter().filter(|(_, o)| o.mapped().is_some()).count();
    info!("Mapped {} of {} stack frames", mapped, frames.len());

    Ok(outcomes)
}

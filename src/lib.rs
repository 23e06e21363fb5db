//! Stack Source Mapper
//!
//! Resolves stack traces from minified/bundled JavaScript back to the
//! original file, line, column and function name, using the source map
//! files found in a directory.
//!
//! ## Getting Started
//!
//! ```ignore
//! use stack_source_mapper::{map_stack_trace, MappingOptions};
//!
//! let options = MappingOptions::new().with_strict_matching(true).with_snippet(true);
//! let mapped = map_stack_trace(&trace_text, "dist/maps/", &options)?;
//! println!("{mapped}");
//! ```
//!
//! Use [`parse_stack_trace`] and [`map_stack_frames`] to parse once and map
//! the structured frames as many times as needed.

pub mod commands;
pub mod mapper;
pub mod output;
pub mod parser;
pub mod sourcemap;
pub mod utils;

pub use mapper::{
    map_frames_with_outcomes, map_stack_frames, map_stack_trace, FrameOutcome, MappingOptions,
};
pub use parser::{parse_stack_trace, MappedFrame, SnippetLine, StackFrame};

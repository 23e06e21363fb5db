//! Stack-trace parsing and the frame data model.
//!
//! This module handles:
//! - Recognizing engine-specific stack frame lines
//! - Coercing captured text into structured frames
//! - Defining the input/output frame schema

pub mod schema;
pub mod stack_trace;

// Re-export main types
pub use schema::{MappedFrame, SnippetLine, StackFrame};
pub use stack_trace::parse_stack_trace;

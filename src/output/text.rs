//! Plain-text rendering of mapped frames.
//!
//! Each frame renders as
//! `<function> -> (  <file> [<line>:<column>]  )`, followed, when a snippet
//! is present, by a separator line and one `<line>:  <text>` row per
//! snippet line.

use crate::parser::schema::{MappedFrame, StackFrame};
use crate::utils::config::{LINE_ENDING, SNIPPET_SEPARATOR, UNKNOWN_FILE, UNKNOWN_FUNCTION};
use std::fmt::Display;

/// Render all frames, joined by the platform line terminator
pub fn serialize_frames(frames: &[MappedFrame]) -> String {
    frames
        .iter()
        .map(serialize_frame)
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}

/// Render one mapped frame, snippet included
pub fn serialize_frame(frame: &MappedFrame) -> String {
    let mut out = frame_line(
        frame.function_name.as_deref(),
        frame.file_reference.as_deref(),
        frame.line_number,
        frame.column_number,
    );

    if let Some(snippet) = frame.source_snippet.as_ref().filter(|s| !s.is_empty()) {
        out.push_str(LINE_ENDING);
        out.push_str(SNIPPET_SEPARATOR);
        for line in snippet {
            out.push_str(LINE_ENDING);
            out.push_str(&format!("{}:  {}", line.line_number, line.text));
        }
    }

    out
}

/// Render an input frame the same way, for diagnostics
pub fn describe_stack_frame(frame: &StackFrame) -> String {
    frame_line(
        frame.function_name.as_deref(),
        frame.file_reference.as_deref(),
        frame.line_number,
        frame.column_number,
    )
}

fn frame_line(
    function: Option<&str>,
    file: Option<&str>,
    line: Option<u32>,
    column: Option<u32>,
) -> String {
    format!(
        "{} -> (  {} [{}:{}]  )",
        function.unwrap_or(UNKNOWN_FUNCTION),
        file.unwrap_or(UNKNOWN_FILE),
        or_placeholder(line),
        or_placeholder(column)
    )
}

fn or_placeholder<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

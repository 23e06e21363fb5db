//! Output writers for mapped stack traces.
//!
//! - Plain text, in the familiar `fn -> ( file [line:col] )` layout
//! - Versioned JSON frame documents

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{frames_to_string, read_frames, write_frames, FrameDocument};
pub use text::{describe_stack_frame, serialize_frame, serialize_frames};

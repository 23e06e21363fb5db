//! Frame-to-source-map matching and position resolution.
//!
//! This module handles:
//! - Choosing a map file per frame (strict or longest-prefix)
//! - Resolving original file/line/column/name through the map
//! - Cutting source snippets around the resolved line
//! - Running all of it over a whole stack trace

pub mod options;
pub mod orchestrator;
pub mod resolver;
pub mod selector;
pub mod snippet;

// Re-export main types
pub use options::MappingOptions;
pub use orchestrator::{map_frames_with_outcomes, map_stack_frames, map_stack_trace, FrameOutcome};
pub use resolver::{resolve_frame, resolve_with};
pub use selector::{common_prefix_len, list_map_files, select_map_file};
pub use snippet::extract_snippet;

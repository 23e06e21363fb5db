//! Configuration and constants for the mapper and the CLI.

/// File name suffix identifying a source map in the map directory
pub const MAP_FILE_SUFFIX: &str = ".map";

/// Lines shown before/after the resolved line when snippets are enabled
pub const DEFAULT_SNIPPET_RADIUS: usize = 3;

/// Separator printed between a mapped frame and its source snippet
pub const SNIPPET_SEPARATOR: &str = "--------------------source code -----------------";

/// Function name used when a frame carries none
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Rendered in place of a frame with no file reference
pub const UNKNOWN_FILE: &str = "<unknown>";

/// The only source map revision we decode
pub const SOURCE_MAP_VERSION: u32 = 3;

/// Anti-XSSI guard some servers prepend to source map JSON
pub const XSSI_PREFIX: &str = ")]}'";

/// Current JSON frame document version
pub const FRAMES_SCHEMA_VERSION: &str = "1.0.0";

/// Environment variable that can supply the map directory to the CLI
pub const MAPS_DIR_ENV: &str = "STACK_SOURCE_MAPPER_MAPS";

// Frames in text output are joined with the platform's line terminator
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

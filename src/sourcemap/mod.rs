//! Source map decoding.
//!
//! - `vlq`: Base64 VLQ decoding of the `mappings` field
//! - `consumer`: parsed maps and original-position lookup

pub mod consumer;
pub mod vlq;

// Re-export main types
pub use consumer::{OriginalPosition, ParsedSourceMap, SourceMapConsumer};
pub use vlq::{decode_vlq_mappings, decode_vlq_segment, DecodedMappings, Mapping};

//! Source map parsing and original-position lookup.
//!
//! Implements the Source Map v3 format closely enough to answer the two
//! questions the mapper asks: "where did this generated position come from"
//! and "what was the original text of that source".

use super::vlq::{decode_vlq_mappings, DecodedMappings};
use crate::utils::config::{SOURCE_MAP_VERSION, XSSI_PREFIX};
use crate::utils::error::SourceMapError;
use log::debug;
use serde::Deserialize;

/// Decoder capability used by the position resolver
pub trait SourceMapConsumer {
    /// Original position for a generated `line` (1-based) and `column` (0-based).
    ///
    /// Sub-fields the map cannot resolve come back as `None`. A missing
    /// column is looked up as column 0; a missing or zero line is an error.
    fn original_position_for(
        &self,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<OriginalPosition, SourceMapError>;

    /// Embedded original text for `source`, if the map carries it
    fn source_content_for(&self, source: &str) -> Option<&str>;
}

/// Result of an original-position query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalPosition {
    pub source: Option<String>,
    /// 1-based
    pub line: Option<u32>,
    /// 0-based
    pub column: Option<u32>,
    pub name: Option<String>,
}

/// Raw source map JSON structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
    version: u32,
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    source_root: Option<String>,
    #[serde(default)]
    sources: Vec<String>,
    #[serde(default)]
    sources_content: Option<Vec<Option<String>>>,
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    mappings: String,
    #[serde(default)]
    sections: Option<serde_json::Value>,
}

/// Parsed source map ready for lookups
#[derive(Debug, Clone)]
pub struct ParsedSourceMap {
    /// Generated file name, if recorded
    pub file: Option<String>,
    pub source_root: Option<String>,
    pub sources: Vec<String>,
    pub sources_content: Vec<Option<String>>,
    pub names: Vec<String>,
    mappings: DecodedMappings,
}

impl ParsedSourceMap {
    /// Parse a source map from its JSON text
    ///
    /// # Errors
    /// * `SourceMapError::InvalidJson` - Not a JSON source map
    /// * `SourceMapError::UnsupportedVersion` - Anything but version 3
    /// * `SourceMapError::IndexedMap` - Sectioned maps are not handled
    /// * VLQ and index errors from the `mappings` field
    pub fn from_str(data: &str) -> Result<Self, SourceMapError> {
        let data = data.trim_start();
        let data = match data.strip_prefix(XSSI_PREFIX) {
            // The guard is followed by the rest of its line
            Some(rest) => rest.split_once('\n').map(|(_, json)| json).unwrap_or(""),
            None => data,
        };

        let raw: RawSourceMap = serde_json::from_str(data)?;

        if raw.version != SOURCE_MAP_VERSION {
            return Err(SourceMapError::UnsupportedVersion(raw.version));
        }
        if raw.sections.is_some() {
            return Err(SourceMapError::IndexedMap);
        }

        let mappings = decode_vlq_mappings(&raw.mappings)?;
        validate_mappings(&mappings, raw.sources.len(), raw.names.len())?;

        debug!(
            "Decoded source map: {} sources, {} names, {} mappings",
            raw.sources.len(),
            raw.names.len(),
            mappings.len()
        );

        Ok(Self {
            file: raw.file,
            source_root: raw.source_root,
            sources: raw.sources,
            sources_content: raw.sources_content.unwrap_or_default(),
            names: raw.names,
            mappings,
        })
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }

    pub fn has_sources_content(&self) -> bool {
        self.sources_content.iter().any(Option::is_some)
    }

    /// Resolve a source path against the source root if present
    fn resolve_source_path(&self, source: &str) -> String {
        match &self.source_root {
            Some(root) if !root.is_empty() => {
                format!("{}/{}", root.trim_end_matches('/'), source)
            }
            _ => source.to_string(),
        }
    }
}

impl SourceMapConsumer for ParsedSourceMap {
    fn original_position_for(
        &self,
        line: Option<u32>,
        column: Option<u32>,
    ) -> Result<OriginalPosition, SourceMapError> {
        let generated_line = match line {
            Some(line) if line >= 1 => line - 1,
            other => return Err(SourceMapError::InvalidLine(other)),
        };
        let generated_column = i64::from(column.unwrap_or(0));

        let Some(original) = self
            .mappings
            .find(generated_line, generated_column)
            .and_then(|mapping| mapping.original)
        else {
            return Ok(OriginalPosition::default());
        };

        // Indices were range-checked when the map was parsed
        let source = self
            .sources
            .get(original.source_index as usize)
            .map(|s| self.resolve_source_path(s));
        let name = original
            .name_index
            .and_then(|idx| self.names.get(idx as usize).cloned());

        Ok(OriginalPosition {
            source,
            line: u32::try_from(original.line + 1).ok(),
            column: u32::try_from(original.column).ok(),
            name,
        })
    }

    fn source_content_for(&self, source: &str) -> Option<&str> {
        let index = self
            .sources
            .iter()
            .position(|s| s == source || self.resolve_source_path(s) == source)?;

        self.sources_content.get(index)?.as_deref()
    }
}

/// Reject mappings that point outside the `sources`/`names` tables
///
/// **Private** - internal validation for from_str
fn validate_mappings(
    mappings: &DecodedMappings,
    source_count: usize,
    name_count: usize,
) -> Result<(), SourceMapError> {
    for original in mappings.iter().filter_map(|m| m.original) {
        if original.source_index < 0 || original.source_index as usize >= source_count {
            return Err(SourceMapError::InvalidSourceIndex(original.source_index));
        }
        if let Some(name_index) = original.name_index {
            if name_index < 0 || name_index as usize >= name_count {
                return Err(SourceMapError::InvalidNameIndex(name_index));
            }
        }
        if original.line < 0 || original.column < 0 {
            return Err(SourceMapError::InvalidOriginalPosition {
                line: original.line,
                column: original.column,
            });
        }
    }

    Ok(())
}

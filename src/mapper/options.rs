//! Options applied to every frame of a mapping run.

use crate::utils::config::DEFAULT_SNIPPET_RADIUS;
use serde::{Deserialize, Serialize};

/// Mapping configuration
///
/// Deserializes from camelCase keys; any key left out takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingOptions {
    /// Require an exact `<file>.map` match instead of the longest shared prefix
    pub strict_matching: bool,

    /// Attach original source lines around each resolved position
    pub include_snippet: bool,

    /// Lines before/after the resolved line in a snippet
    pub snippet_radius: usize,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            strict_matching: false,
            include_snippet: false,
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
        }
    }
}

impl MappingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_matching(mut self, strict: bool) -> Self {
        self.strict_matching = strict;
        self
    }

    pub fn with_snippet(mut self, include: bool) -> Self {
        self.include_snippet = include;
        self
    }

    pub fn with_snippet_radius(mut self, radius: usize) -> Self {
        self.snippet_radius = radius;
        self
    }
}

//! Frame data model shared by the parser, the mapper and the output writers.
//!
//! All types serialize with camelCase keys so frame documents stay readable
//! next to the JavaScript tooling that produced the traces.

use serde::{Deserialize, Serialize};

/// One frame of a raw (minified) stack trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// File or URL the frame points into (e.g. `https://host/main.js`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_reference: Option<String>,

    /// 1-based line in the generated file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    /// Column in the generated file, as reported by the runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_arguments: Option<Vec<String>>,
}

impl StackFrame {
    pub fn new(file_reference: impl Into<String>, line_number: u32, column_number: u32) -> Self {
        Self {
            file_reference: Some(file_reference.into()),
            line_number: Some(line_number),
            column_number: Some(column_number),
            ..Self::default()
        }
    }

    pub fn with_function(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Final path segment of the file reference (text after the last `/`)
    pub fn file_key(&self) -> Option<&str> {
        self.file_reference
            .as_deref()
            .map(|file| file.rsplit('/').next().unwrap_or(file))
    }
}

/// A frame resolved back to its original source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedFrame {
    /// Original source file as named in the source map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_reference: Option<String>,

    /// 1-based line in the original source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,

    /// 0-based column in the original source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_snippet: Option<Vec<SnippetLine>>,
}

/// A single line of original source shown around a mapped frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetLine {
    /// 1-based line number in the original file
    pub line_number: u32,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_key_takes_last_segment() {
        let frame = StackFrame::new("https://host/app/main.b033.js", 1, 10);
        assert_eq!(frame.file_key(), Some("main.b033.js"));
    }

    #[test]
    fn test_file_key_without_slash() {
        let frame = StackFrame::new("main.js", 1, 10);
        assert_eq!(frame.file_key(), Some("main.js"));
    }

    #[test]
    fn test_file_key_absent() {
        assert_eq!(StackFrame::default().file_key(), None);
    }

    #[test]
    fn test_frame_serializes_camel_case() {
        let frame = StackFrame::new("main.js", 1, 536926).with_function("new fe");
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["fileReference"], "main.js");
        assert_eq!(json["lineNumber"], 1);
        assert_eq!(json["columnNumber"], 536926);
        assert_eq!(json["functionName"], "new fe");
        assert!(json.get("functionArguments").is_none());
    }
}

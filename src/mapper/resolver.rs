//! Position resolution for a single frame against a chosen map file.

use super::options::MappingOptions;
use super::snippet::extract_snippet;
use crate::parser::schema::{MappedFrame, SnippetLine, StackFrame};
use crate::sourcemap::{OriginalPosition, ParsedSourceMap, SourceMapConsumer};
use crate::utils::error::MapError;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Load `map_file` from `base_directory` and resolve `frame` through it
///
/// **Public** - called once per matched frame; the map is re-read every time
///
/// # Errors
/// * `MapError::Unreadable` - Map file cannot be read
/// * `MapError::NotParseable` - Map file is not a decodable source map
/// * `MapError::Lookup` - Frame has no usable generated line
pub fn resolve_frame(
    frame: &StackFrame,
    map_file: &str,
    base_directory: &Path,
    options: &MappingOptions,
) -> Result<MappedFrame, MapError> {
    let path = base_directory.join(map_file);
    debug!("Loading source map: {}", path.display());

    let raw = fs::read_to_string(&path).map_err(|source| MapError::Unreadable {
        path: path.clone(),
        source,
    })?;
    let consumer =
        ParsedSourceMap::from_str(&raw).map_err(|source| MapError::NotParseable { path, source })?;
    debug!(
        "Source map {} (file {}): {} mappings, embedded sources: {}",
        map_file,
        consumer.file.as_deref().unwrap_or("-"),
        consumer.mapping_count(),
        consumer.has_sources_content()
    );

    resolve_with(&consumer, frame, options)
}

/// Resolve `frame` through an already decoded map
///
/// **Public** - decoder-agnostic half of resolve_frame
///
/// Position fields are copied as the decoder returns them, absent ones
/// included. Snippet problems only cost the snippet, never the frame.
pub fn resolve_with<C>(
    consumer: &C,
    frame: &StackFrame,
    options: &MappingOptions,
) -> Result<MappedFrame, MapError>
where
    C: SourceMapConsumer + ?Sized,
{
    let position = consumer
        .original_position_for(frame.line_number, frame.column_number)
        .map_err(MapError::Lookup)?;

    let source_snippet = if options.include_snippet {
        snippet_for(consumer, &position, options.snippet_radius)
    } else {
        None
    };

    Ok(MappedFrame {
        file_reference: position.source,
        line_number: position.line,
        column_number: position.column,
        function_name: position.name,
        source_snippet,
    })
}

/// Original lines around the resolved position, if the map embeds them
///
/// **Private** - internal helper for resolve_with
fn snippet_for<C>(
    consumer: &C,
    position: &OriginalPosition,
    radius: usize,
) -> Option<Vec<SnippetLine>>
where
    C: SourceMapConsumer + ?Sized,
{
    let source = position.source.as_deref()?;

    let content = consumer.source_content_for(source);
    if content.is_none() {
        warn!("No source content for {}, snippet omitted", source);
    }

    extract_snippet(content, position.line, radius).filter(|lines| !lines.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SourceMapError;
    use pretty_assertions::assert_eq;

    /// Decoder stub answering every query with a fixed position
    struct FixedConsumer {
        position: OriginalPosition,
        content: Option<&'static str>,
    }

    impl SourceMapConsumer for FixedConsumer {
        fn original_position_for(
            &self,
            line: Option<u32>,
            _column: Option<u32>,
        ) -> Result<OriginalPosition, SourceMapError> {
            match line {
                Some(_) => Ok(self.position.clone()),
                None => Err(SourceMapError::InvalidLine(None)),
            }
        }

        fn source_content_for(&self, _source: &str) -> Option<&str> {
            self.content
        }
    }

    fn fe_position() -> OriginalPosition {
        OriginalPosition {
            source: Some("fe.ts".to_string()),
            line: Some(5),
            column: Some(4),
            name: Some("fe".to_string()),
        }
    }

    #[test]
    fn test_fields_pass_through() {
        let consumer = FixedConsumer {
            position: fe_position(),
            content: None,
        };
        let frame = StackFrame::new("main.js", 1, 536926);

        let mapped = resolve_with(&consumer, &frame, &MappingOptions::default()).unwrap();
        assert_eq!(
            mapped,
            MappedFrame {
                file_reference: Some("fe.ts".to_string()),
                line_number: Some(5),
                column_number: Some(4),
                function_name: Some("fe".to_string()),
                source_snippet: None,
            }
        );
    }

    #[test]
    fn test_anonymous_function_keeps_no_name() {
        let consumer = FixedConsumer {
            position: OriginalPosition {
                name: None,
                ..fe_position()
            },
            content: None,
        };
        let frame = StackFrame::new("main.js", 1, 10);

        let mapped = resolve_with(&consumer, &frame, &MappingOptions::default()).unwrap();
        assert_eq!(mapped.function_name, None);
    }

    #[test]
    fn test_snippet_attached() {
        let consumer = FixedConsumer {
            position: fe_position(),
            content: Some("a\nb\nc\nd\ne\nf\ng\nh"),
        };
        let frame = StackFrame::new("main.js", 1, 10);
        let options = MappingOptions::new().with_snippet(true).with_snippet_radius(1);

        let mapped = resolve_with(&consumer, &frame, &options).unwrap();
        let snippet = mapped.source_snippet.unwrap();
        assert_eq!(
            snippet,
            vec![
                SnippetLine { line_number: 4, text: "d".to_string() },
                SnippetLine { line_number: 5, text: "e".to_string() },
            ]
        );
    }

    #[test]
    fn test_missing_content_degrades_to_no_snippet() {
        let consumer = FixedConsumer {
            position: fe_position(),
            content: None,
        };
        let frame = StackFrame::new("main.js", 1, 10);
        let options = MappingOptions::new().with_snippet(true);

        let mapped = resolve_with(&consumer, &frame, &options).unwrap();
        assert_eq!(mapped.file_reference.as_deref(), Some("fe.ts"));
        assert!(mapped.source_snippet.is_none());
    }

    #[test]
    fn test_missing_line_fails_lookup() {
        let consumer = FixedConsumer {
            position: fe_position(),
            content: None,
        };
        let frame = StackFrame {
            file_reference: Some("main.js".to_string()),
            ..StackFrame::default()
        };

        let result = resolve_with(&consumer, &frame, &MappingOptions::default());
        assert!(matches!(result, Err(MapError::Lookup(_))));
    }

    #[test]
    fn test_unreadable_map_file() {
        let dir = tempfile::tempdir().unwrap();
        let frame = StackFrame::new("main.js", 1, 10);

        let result = resolve_frame(
            &frame,
            "main.js.map",
            dir.path(),
            &MappingOptions::default(),
        );
        assert!(matches!(result, Err(MapError::Unreadable { .. })));
    }

    #[test]
    fn test_corrupt_map_file_is_not_parseable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.js.map"), "{ definitely not json").unwrap();
        let frame = StackFrame::new("main.js", 1, 10);

        let result = resolve_frame(
            &frame,
            "main.js.map",
            dir.path(),
            &MappingOptions::default(),
        );
        let err = result.unwrap_err();
        assert!(matches!(err, MapError::NotParseable { .. }));
        assert!(err.to_string().starts_with("Not parseable"));
    }
}

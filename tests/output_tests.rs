use pretty_assertions::assert_eq;
use stack_source_mapper::output::{read_frames, serialize_frames, write_frames};
use stack_source_mapper::parser::{MappedFrame, SnippetLine};
use stack_source_mapper::utils::config::{LINE_ENDING, SNIPPET_SEPARATOR};
use tempfile::tempdir;

fn mapped_with_snippet() -> MappedFrame {
    MappedFrame {
        file_reference: Some("webpack:///src/fe.ts".to_string()),
        line_number: Some(42),
        column_number: Some(4),
        function_name: Some("fe".to_string()),
        source_snippet: Some(vec![
            SnippetLine { line_number: 41, text: "export class fe {".to_string() },
            SnippetLine { line_number: 42, text: "  constructor(node) {".to_string() },
        ]),
    }
}

#[test]
fn test_mapped_frames_json_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mapped.json");
    let frames = vec![mapped_with_snippet(), MappedFrame::default()];

    write_frames(&frames, &path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["frames"][0]["sourceSnippet"][1]["lineNumber"], 42);
    assert!(raw["generated_at"].is_string());

    let loaded: Vec<MappedFrame> = read_frames(&path).unwrap();
    assert_eq!(loaded, frames);
}

#[test]
fn test_text_layout_for_several_frames() {
    let plain = MappedFrame {
        source_snippet: None,
        function_name: None,
        ..mapped_with_snippet()
    };

    let text = serialize_frames(&[mapped_with_snippet(), plain]);

    let expected = [
        "fe -> (  webpack:///src/fe.ts [42:4]  )",
        SNIPPET_SEPARATOR,
        "41:  export class fe {",
        "42:    constructor(node) {",
        "<unknown> -> (  webpack:///src/fe.ts [42:4]  )",
    ]
    .join(LINE_ENDING);
    assert_eq!(text, expected);
}

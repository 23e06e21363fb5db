//! Stack-trace text parser.
//!
//! Recognizes the frame formats emitted by the common JavaScript engines
//! (V8/Chrome/Node, WinJS, SpiderMonkey/Firefox, JavaScriptCore/Safari) and
//! turns each recognized line into a [`StackFrame`]. Lines that match none of
//! the grammars (error headers, blank lines) are skipped.

use super::schema::StackFrame;
use crate::utils::config::UNKNOWN_FUNCTION;
use crate::utils::error::ParseError;
use log::debug;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static CHROME_RE: OnceLock<Regex> = OnceLock::new();
static CHROME_EVAL_RE: OnceLock<Regex> = OnceLock::new();
static WINJS_RE: OnceLock<Regex> = OnceLock::new();
static GECKO_RE: OnceLock<Regex> = OnceLock::new();
static GECKO_EVAL_RE: OnceLock<Regex> = OnceLock::new();
static NODE_RE: OnceLock<Regex> = OnceLock::new();
static JSC_RE: OnceLock<Regex> = OnceLock::new();

fn chrome_regex() -> &'static Regex {
    CHROME_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*at (.*?) ?\(((?:file|https?|blob|chrome-extension|native|eval|webpack|rsc|<anonymous>|/|[a-z]:\\|\\\\).*?)(?::(\d+))?(?::(\d+))?\)?\s*$",
        )
        .expect("Failed to compile Chrome frame regex")
    })
}

fn chrome_eval_regex() -> &'static Regex {
    CHROME_EVAL_RE.get_or_init(|| {
        Regex::new(r"\((\S*)(?::(\d+))(?::(\d+))\)")
            .expect("Failed to compile Chrome eval regex")
    })
}

fn winjs_regex() -> &'static Regex {
    WINJS_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*at (?:((?:\[object object\])?.+) )?\(?((?:file|ms-appx|https?|webpack|rsc|blob):.*?):(\d+)(?::(\d+))?\)?\s*$",
        )
        .expect("Failed to compile WinJS frame regex")
    })
}

fn gecko_regex() -> &'static Regex {
    GECKO_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(.*?)(?:\((.*?)\))?(?:^|@)((?:file|https?|blob|chrome|webpack|rsc|resource|\[native).*?|[^@]*bundle)(?::(\d+))?(?::(\d+))?\s*$",
        )
        .expect("Failed to compile Gecko frame regex")
    })
}

fn gecko_eval_regex() -> &'static Regex {
    GECKO_EVAL_RE.get_or_init(|| {
        Regex::new(r"(?i)(\S+) line (\d+)(?: > eval line \d+)* > eval")
            .expect("Failed to compile Gecko eval regex")
    })
}

fn node_regex() -> &'static Regex {
    NODE_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*at (?:((?:\[object object\])?[^\\/]+(?: \[as \S+\])?) )?\(?(.*?):(\d+)(?::(\d+))?\)?\s*$",
        )
        .expect("Failed to compile Node frame regex")
    })
}

fn jsc_regex() -> &'static Regex {
    JSC_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?:([^@]*)(?:\((.*?)\))?@)?(\S.*?):(\d+)(?::(\d+))?\s*$",
        )
        .expect("Failed to compile JavaScriptCore frame regex")
    })
}

/// Frame fields as captured from a single line, before number coercion
#[derive(Debug, Default)]
struct RawFrame<'a> {
    file: Option<&'a str>,
    method: Option<&'a str>,
    arguments: Vec<String>,
    line: Option<&'a str>,
    column: Option<&'a str>,
}

/// Parse raw stack-trace text into structured frames
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `stack_trace` - Stack trace as printed by a JavaScript runtime
///
/// # Returns
/// One frame per recognized line, in input order
///
/// # Errors
/// * `ParseError::InvalidNumber` - Line or column does not fit in a `u32`
pub fn parse_stack_trace(stack_trace: &str) -> Result<Vec<StackFrame>, ParseError> {
    let mut frames = Vec::new();

    for (line_index, line) in stack_trace.split('\n').enumerate() {
        let Some(raw) = parse_line(line) else {
            continue;
        };
        frames.push(to_stack_frame(raw, line_index)?);
    }

    debug!("Parsed {} stack frames", frames.len());

    Ok(frames)
}

/// Try every known grammar on one line, first match wins
///
/// **Private** - internal helper for parse_stack_trace
fn parse_line(line: &str) -> Option<RawFrame<'_>> {
    parse_chrome(line)
        .or_else(|| parse_winjs(line))
        .or_else(|| parse_gecko(line))
        .or_else(|| parse_node(line))
        .or_else(|| parse_jsc(line))
}

fn capture<'a>(caps: &Captures<'a>, index: usize) -> Option<&'a str> {
    caps.get(index).map(|m| m.as_str()).filter(|s| !s.is_empty())
}

fn parse_chrome(line: &str) -> Option<RawFrame<'_>> {
    let caps = chrome_regex().captures(line)?;

    let mut location = capture(&caps, 2);
    let mut line_number = capture(&caps, 3);
    let mut column = capture(&caps, 4);

    let is_native = location.is_some_and(|l| l.starts_with("native"));
    let is_eval = location.is_some_and(|l| l.starts_with("eval"));

    if is_eval {
        if let Some(sub) = location.and_then(|l| chrome_eval_regex().captures(l)) {
            // The real location sits inside "eval at fn (file:line:col)"
            location = capture(&sub, 1);
            line_number = capture(&sub, 2);
            column = capture(&sub, 3);
        }
    }

    Some(RawFrame {
        file: if is_native { None } else { location },
        method: capture(&caps, 1),
        arguments: match (is_native, location) {
            (true, Some(native)) => vec![native.to_string()],
            _ => Vec::new(),
        },
        line: line_number,
        column,
    })
}

fn parse_winjs(line: &str) -> Option<RawFrame<'_>> {
    let caps = winjs_regex().captures(line)?;

    Some(RawFrame {
        file: capture(&caps, 2),
        method: capture(&caps, 1),
        arguments: Vec::new(),
        line: capture(&caps, 3),
        column: capture(&caps, 4),
    })
}

fn parse_gecko(line: &str) -> Option<RawFrame<'_>> {
    let caps = gecko_regex().captures(line)?;

    let mut file = capture(&caps, 3);
    let mut line_number = capture(&caps, 4);
    let mut column = capture(&caps, 5);

    if file.is_some_and(|f| f.contains(" > eval")) {
        if let Some(sub) = file.and_then(|f| gecko_eval_regex().captures(f)) {
            file = capture(&sub, 1);
            line_number = capture(&sub, 2);
            column = None;
        }
    }

    Some(RawFrame {
        file,
        method: capture(&caps, 1),
        arguments: capture(&caps, 2)
            .map(|args| args.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        line: line_number,
        column,
    })
}

fn parse_node(line: &str) -> Option<RawFrame<'_>> {
    let caps = node_regex().captures(line)?;

    Some(RawFrame {
        file: capture(&caps, 2),
        method: capture(&caps, 1),
        arguments: Vec::new(),
        line: capture(&caps, 3),
        column: capture(&caps, 4),
    })
}

fn parse_jsc(line: &str) -> Option<RawFrame<'_>> {
    let caps = jsc_regex().captures(line)?;

    Some(RawFrame {
        file: capture(&caps, 3),
        method: capture(&caps, 1),
        arguments: Vec::new(),
        line: capture(&caps, 4),
        column: capture(&caps, 5),
    })
}

/// Adapt a captured frame to the public data model
///
/// **Private** - coerces numbers and fills in the unknown function name
fn to_stack_frame(raw: RawFrame<'_>, line_index: usize) -> Result<StackFrame, ParseError> {
    Ok(StackFrame {
        file_reference: raw.file.map(str::to_string),
        line_number: parse_number(raw.line, "line number", line_index)?,
        column_number: parse_number(raw.column, "column number", line_index)?,
        function_name: Some(raw.method.unwrap_or(UNKNOWN_FUNCTION).to_string()),
        function_arguments: (!raw.arguments.is_empty()).then_some(raw.arguments),
    })
}

fn parse_number(
    value: Option<&str>,
    field: &'static str,
    line_index: usize,
) -> Result<Option<u32>, ParseError> {
    value
        .map(|v| {
            v.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                field,
                value: v.to_string(),
                line_index,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chrome_frame_with_function() {
        let frames = parse_stack_trace(
            "    at new fe (https://10.83.12.28/napp/main.b033d45fc5c9075af7a0.js:1:536926)",
        )
        .unwrap();

        assert_eq!(
            frames,
            vec![StackFrame {
                file_reference: Some(
                    "https://10.83.12.28/napp/main.b033d45fc5c9075af7a0.js".to_string(),
                ),
                line_number: Some(1),
                column_number: Some(536926),
                function_name: Some("new fe".to_string()),
                function_arguments: None,
            }]
        );
    }

    #[test]
    fn test_chrome_frame_without_function() {
        let frames = parse_stack_trace(
            "    at https://host/polyfills.fe89e5976386e4a5d9d9.js:1:14994",
        )
        .unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0].file_reference.as_deref(),
            Some("https://host/polyfills.fe89e5976386e4a5d9d9.js")
        );
        assert_eq!(frames[0].function_name.as_deref(), Some(UNKNOWN_FUNCTION));
        assert_eq!(frames[0].line_number, Some(1));
        assert_eq!(frames[0].column_number, Some(14994));
    }

    #[test]
    fn test_chrome_anonymous_location() {
        let frames = parse_stack_trace("    at Generator.next (<anonymous>)").unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].file_reference.as_deref(), Some("<anonymous>"));
        assert_eq!(frames[0].function_name.as_deref(), Some("Generator.next"));
        assert_eq!(frames[0].line_number, None);
        assert_eq!(frames[0].column_number, None);
    }

    #[test]
    fn test_chrome_native_frame() {
        let frames = parse_stack_trace("    at Array.forEach (native)").unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].file_reference, None);
        assert_eq!(
            frames[0].function_arguments,
            Some(vec!["native".to_string()])
        );
    }

    #[test]
    fn test_chrome_eval_frame() {
        let frames = parse_stack_trace(
            "    at eval (eval at foo (http://host/app.js:10:20), <anonymous>:1:5)",
        )
        .unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(
            frames[0].file_reference.as_deref(),
            Some("http://host/app.js")
        );
        assert_eq!(frames[0].line_number, Some(10));
        assert_eq!(frames[0].column_number, Some(20));
    }

    #[test]
    fn test_gecko_frame_with_arguments() {
        let frames = parse_stack_trace("render(a,b)@https://host/main.js:3:17").unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].function_name.as_deref(), Some("render"));
        assert_eq!(
            frames[0].file_reference.as_deref(),
            Some("https://host/main.js")
        );
        assert_eq!(
            frames[0].function_arguments,
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(frames[0].line_number, Some(3));
        assert_eq!(frames[0].column_number, Some(17));
    }

    #[test]
    fn test_node_frame() {
        let frames = parse_stack_trace("    at Object.run (dist/server.js:12:5)").unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].file_reference.as_deref(), Some("dist/server.js"));
        assert_eq!(frames[0].function_name.as_deref(), Some("Object.run"));
        assert_eq!(frames[0].line_number, Some(12));
    }

    #[test]
    fn test_header_and_blank_lines_are_skipped() {
        let trace = concat!(
            "\nTypeError: Failed to convert value to 'Node'.\n",
            "    at f.update (https://host/main.js:1:557094)\n",
        );
        let frames = parse_stack_trace(trace).unwrap();

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].function_name.as_deref(), Some("f.update"));
    }

    #[test]
    fn test_line_number_overflow_is_an_error() {
        let result = parse_stack_trace("    at f (https://host/main.js:99999999999:1)");
        assert!(matches!(
            result,
            Err(ParseError::InvalidNumber { field: "line number", .. })
        ));
    }
}

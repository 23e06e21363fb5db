//! Source snippet extraction around a resolved line.

use crate::parser::schema::SnippetLine;

/// Window of original source lines around `target_line`
///
/// **Public** - used by the resolver when snippets are requested
///
/// The window starts `radius` lines before the target and stops just short
/// of `radius` lines after it, clipped to the text. One blank line at each
/// end of the text is ignored. Returns `None` without text or target line.
pub fn extract_snippet(
    source_text: Option<&str>,
    target_line: Option<u32>,
    radius: usize,
) -> Option<Vec<SnippetLine>> {
    let text = source_text?;
    let target_line = target_line?;

    let mut lines: Vec<&str> = text.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }

    let target_index = (target_line as usize).saturating_sub(1);
    let start = target_index.saturating_sub(radius).min(lines.len());
    let end = target_index.saturating_add(radius).min(lines.len());

    if start >= end {
        return Some(Vec::new());
    }

    Some(
        lines[start..end]
            .iter()
            .enumerate()
            .map(|(offset, text)| SnippetLine {
                line_number: (start + offset + 1) as u32,
                text: (*text).to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ten_lines() -> String {
        (1..=10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_window_around_target() {
        let snippet = extract_snippet(Some(&ten_lines()), Some(5), 3).unwrap();

        let numbers: Vec<u32> = snippet.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(snippet[0].text, "line 2");
        assert_eq!(snippet[3].text, "line 5");
    }

    #[test]
    fn test_window_clipped_at_start() {
        let snippet = extract_snippet(Some(&ten_lines()), Some(1), 3).unwrap();

        let numbers: Vec<u32> = snippet.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(snippet[0].text, "line 1");
    }

    #[test]
    fn test_window_clipped_at_end() {
        let snippet = extract_snippet(Some(&ten_lines()), Some(10), 3).unwrap();

        let numbers: Vec<u32> = snippet.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_target_past_end_is_empty() {
        let snippet = extract_snippet(Some("a\nb"), Some(40), 3).unwrap();
        assert!(snippet.is_empty());
    }

    #[test]
    fn test_trailing_newline_ignored() {
        let snippet = extract_snippet(Some("a\nb\nc\n"), Some(3), 1).unwrap();
        assert_eq!(snippet.len(), 2);
        assert_eq!(snippet[0].text, "b");
        assert_eq!(snippet[1].text, "c");
    }

    #[test]
    fn test_missing_inputs() {
        assert!(extract_snippet(None, Some(3), 3).is_none());
        assert!(extract_snippet(Some("a\nb"), None, 3).is_none());
    }
}

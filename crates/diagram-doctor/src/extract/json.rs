//! JSON errors (Vega, Vega-Lite, WaveDrom, Excalidraw).
//!
//! JavaScript JSON parsers usually report a character offset (`at position N`); newer engines
//! append `(line L column C)`. An offset alone is converted to a line by the caller, which holds
//! the source text.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static LINE_COLUMN_PAREN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\(line (\d+) column (\d+)\)"));
static AT_LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bat line (\d+),? column (\d+)"));
static POSITION: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bat position (\d+)"));
static UNEXPECTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)unexpected token\s+'?([^\s']+)'?"));
static EXPECTED: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bexpected\s+(?:'([^']+)'|`([^`]+)`)"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = LINE_COLUMN_PAREN.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = AT_LINE_COLUMN.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    }
    if let Some(caps) = POSITION.captures(text) {
        info.offset = capture_number(&caps, 1);
    }

    if let Some(caps) = UNEXPECTED_TOKEN.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }
    if let Some(caps) = EXPECTED.captures(text) {
        info.set_expected(capture_text(&caps, 1).or_else(|| capture_text(&caps, 2)));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_only() {
        let info = extract("Unexpected token } in JSON at position 42");
        assert_eq!(info.line, None);
        assert_eq!(info.offset, Some(42));
        assert_eq!(info.found.as_deref(), Some("}"));
    }

    #[test]
    fn test_position_with_line_column() {
        let info = extract(
            "Expected ',' or '}' after property value in JSON at position 42 (line 3 column 5)",
        );
        assert_eq!(info.line, Some(3));
        assert_eq!(info.column, Some(5));
        assert_eq!(info.offset, Some(42));
        assert_eq!(info.expected.as_deref(), Some(","));
    }

    #[test]
    fn test_quoted_unexpected_token() {
        let info = extract(r#"Unexpected token '}', "{"a": }" is not valid JSON"#);
        assert_eq!(info.found.as_deref(), Some("}"));
    }

    #[test]
    fn test_serde_style() {
        let info = extract("expected `,` or `}` at line 2 column 9");
        assert_eq!(info.line, Some(2));
        assert_eq!(info.column, Some(9));
        assert_eq!(info.expected.as_deref(), Some(","));
    }

    #[test]
    fn test_end_of_input() {
        assert!(extract("Unexpected end of JSON input").is_empty());
    }
}

//! ASCII-art errors (Svgbob, Ditaa).
//!
//! These renderers think in grid cells, so positions often come as rows and columns.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static ROW_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\brow\s*(\d+)\s*,?\s*col(?:umn)?\s*(\d+)"));
static LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bline\s*(\d+)\s*,?\s*col(?:umn)?\s*(\d+)"));
static AT_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\b(?:at|on) (?:line|row) (\d+)"));
static CHARACTER: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bcharacter\s+'([^']+)'"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = ROW_COLUMN.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = LINE_COLUMN.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = AT_LINE.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    }

    if let Some(caps) = CHARACTER.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_column() {
        let info = extract("Unrecognized character '\u{2500}' at row 4, col 17");
        assert_eq!(info.line, Some(4));
        assert_eq!(info.column, Some(17));
        assert_eq!(info.found.as_deref(), Some("\u{2500}"));
    }

    #[test]
    fn test_at_line() {
        let info = extract("Error: tab found on line 6");
        assert_eq!(info.line, Some(6));
        assert_eq!(info.column, None);
    }

    #[test]
    fn test_garbage() {
        assert!(extract("").is_empty());
    }
}

//! YAML errors (WireViz).
//!
//! PyYAML reports two marks: the context being parsed, then the problem itself. The problem mark
//! comes last, so the last `line X, column Y` wins.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static PY_MARK: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bline (\d+), column (\d+)"));
// js-yaml: bad indentation of a mapping entry (3:5)
static JS_MARK: LazyLock<Regex> = LazyLock::new(|| regex(r"\((\d+):(\d+)\)"));
static AT_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bat line (\d+)"));
static EXPECTED_FOUND: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?im)\bexpected ([^,\n]+), but found '?([^'\n]+?)'?\s*$"));
static FOUND_CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)found character '([^']*)'"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = PY_MARK.captures_iter(text).last() {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = JS_MARK.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = AT_LINE.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    }

    if let Some(caps) = EXPECTED_FOUND.captures(text) {
        info.set_expected(capture_text(&caps, 1).map(|e| e.trim().to_string()));
        info.set_found(capture_text(&caps, 2));
    }
    if let Some(caps) = FOUND_CHARACTER.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyyaml_problem_mark_wins() {
        let text = "while parsing a block mapping\n  in \"<unicode string>\", line 1, column 1\nexpected <block end>, but found '<block mapping start>'\n  in \"<unicode string>\", line 3, column 3";
        let info = extract(text);
        assert_eq!(info.line, Some(3));
        assert_eq!(info.column, Some(3));
        assert_eq!(info.expected.as_deref(), Some("<block end>"));
        assert_eq!(info.found.as_deref(), Some("<block mapping start>"));
    }

    #[test]
    fn test_js_yaml_mark() {
        let info = extract("bad indentation of a mapping entry (3:5)");
        assert_eq!(info.line, Some(3));
        assert_eq!(info.column, Some(5));
    }

    #[test]
    fn test_tab_character() {
        let text = "while scanning for the next token\nfound character '\\t' that cannot start any token\n  in \"<unicode string>\", line 2, column 1";
        let info = extract(text);
        assert_eq!(info.line, Some(2));
        assert_eq!(info.found.as_deref(), Some("\\t"));
    }

    #[test]
    fn test_garbage() {
        assert!(extract("").is_empty());
    }
}

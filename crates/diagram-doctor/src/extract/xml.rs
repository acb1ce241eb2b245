//! XML errors (BPMN, UMLet).
//!
//! Covers the shapes of the common XML stacks: sax-style `Line: X\nColumn: Y`, Xerces-style
//! `lineNumber: X; columnNumber: Y`, browser `DOMParser` output and bpmn-moddle import warnings.
//! The offending element name is kept in `near` so the fix engine can close an unclosed tag.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static SAX_POSITION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bline:\s*(\d+)[\s,;]*column:\s*(\d+)"));
static XERCES_POSITION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)lineNumber:\s*(\d+);\s*columnNumber:\s*(\d+)"));
static DOM_POSITION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)error on line (\d+) at column (\d+)"));
static LINE_ONLY: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bline:?\s*(\d+)"));
static CHAR: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bchar:\s*(\S+)"));
static ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?i)\belement\s+['"<]([\w:.-]+)['">]"#));
static UNCLOSED: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)unclosed (?:root )?(?:tag|element)[ \t]*[:<]?[ \t]*<?([\w:.-]+)")
});
static END_TAG: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?i)end-tag\s+"</([\w:.-]+)>""#));
static UNPARSABLE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)unparsable content <([\w:.-]+)"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = XERCES_POSITION.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = SAX_POSITION.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = DOM_POSITION.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = LINE_ONLY.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    }

    for pattern in [&*UNCLOSED, &*END_TAG, &*UNPARSABLE, &*ELEMENT] {
        if let Some(caps) = pattern.captures(text) {
            info.set_near(capture_text(&caps, 1));
            break;
        }
    }
    if let Some(caps) = CHAR.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }

    info
}

//! Flow/sequence diagram errors (Jison-generated Mermaid grammars).
//!
//! ```text
//! Parse error on line 2:
//! ...TD    A[Start --> B[End]
//! ----------------------^
//! Expecting 'SQE', 'DOUBLECIRCLEEND', 'PE', got 'EOF'
//! ```

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static LINE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)(?:parse|lexical) error on line (\d+)"));
// Dash run under the echoed source; the caret sits one column past it.
static POINTER: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^(-*)\^"));
static ON_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bon line (\d+)"));
static NO_DIAGRAM_TYPE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)no diagram type detected|unknown diagram type"));
static EXPECTING: LazyLock<Regex> = LazyLock::new(|| regex(r"Expecting\s+'([^']*)'"));
static GOT: LazyLock<Regex> = LazyLock::new(|| regex(r"\bgot\s+'([^']*)'"));
static NEAR: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bnear\s+'([^']*)'"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = LINE_HEADER.captures(text) {
        let after_header = caps.get(0).map_or("", |m| &text[m.end()..]);
        let column = POINTER
            .captures(after_header)
            .and_then(|pointer| pointer.get(1))
            .map(|dashes| dashes.as_str().len() + 1);
        info.set_position(capture_number(&caps, 1), column);
    } else if let Some(caps) = ON_LINE.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    } else if NO_DIAGRAM_TYPE.is_match(text) {
        info.set_position(Some(1), Some(1));
    }

    if let Some(caps) = EXPECTING.captures(text) {
        info.set_expected(capture_text(&caps, 1));
    }
    if let Some(caps) = GOT.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }
    if let Some(caps) = NEAR.captures(text) {
        info.set_near(capture_text(&caps, 1));
    }

    info
}

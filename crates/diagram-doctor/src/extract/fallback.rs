//! Generic fallback extraction.
//!
//! Used when the format-specific extractor found no line, and for formats without one. The
//! position patterns are ordered from most to least specific; the first match wins. The cause
//! patterns run independently.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static POSITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // line 3, column 5
        regex(r"(?i)\bline\s*:?\s*(\d+)\s*,\s*col(?:umn)?\s*:?\s*(\d+)"),
        // (3, 5) or (3:5)
        regex(r"\((\d+)\s*[,:]\s*(\d+)\)"),
        // 3:5:
        regex(r"(\d+):(\d+):"),
        // line 3 / row 3
        regex(r"(?i)\b(?:line|row)\s*:?\s*(\d+)"),
        // :3:
        regex(r":(\d+):"),
    ]
});
static NEAR: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bnear\s+'([^']*)'"));
static FOUND: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:found|got|actual)\s*:?\s*'([^']*)'"));
static EXPECTED: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:expected|expecting)\s*:?\s*'([^']*)'"));

/// Extract whatever a generic pattern can find in `text`.
pub fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    for pattern in POSITION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
            break;
        }
    }

    if let Some(caps) = NEAR.captures(text) {
        info.set_near(capture_text(&caps, 1));
    }
    if let Some(caps) = FOUND.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }
    if let Some(caps) = EXPECTED.captures(text) {
        info.set_expected(capture_text(&caps, 1));
    }

    info
}

//! Graph-description language errors (Graphviz, the blockdiag family, D2, nomnoml, erd, Pikchr).

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

// Error: <stdin>: syntax error in line 3 near '->'
static DOT_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)syntax error in line (\d+)(?:\s+near\s+'([^']*)')?"));
// Warning: <stdin>:3: ...
static STDIN_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"<stdin>:(\d+):"));
// funcparserlib (blockdiag family): got unexpected token: 3,5-3,6: Op '}'
static UNEXPECTED_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?i)got unexpected token:\s*(\d+),(\d+)-\d+,\d+(?::\s*(?:\w+\s+)?'([^']*)')?")
});
// D2: d2/input.d2:3:5: unexpected text after map key
static D2_POSITION: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)(?:^|\s)[\w./-]*\.d2:(\d+):(\d+):"));
// nomnoml: Parse error at line 3 column 5, expected ...
static LINE_COLUMN: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bline (\d+),? col(?:umn)? (\d+)"));
static LINE_ONLY: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:at|in|on) line (\d+)"));
static TOKEN: LazyLock<Regex> = LazyLock::new(|| regex(r"Token\('?\w+'?,\s*'([^']*)'\)"));
static EXPECTED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bexpected\s+'([^']+)'"));
static FOUND: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:got|found|saw)\s+'([^']+)'"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if let Some(caps) = DOT_SYNTAX.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
        info.set_near(capture_text(&caps, 2));
    } else if let Some(caps) = UNEXPECTED_RANGE.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
        info.set_found(capture_text(&caps, 3));
    } else if let Some(caps) = D2_POSITION.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = LINE_COLUMN.captures(text) {
        info.set_position(capture_number(&caps, 1), capture_number(&caps, 2));
    } else if let Some(caps) = STDIN_LINE.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    } else if let Some(caps) = LINE_ONLY.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    }

    if let Some(caps) = TOKEN.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }
    if let Some(caps) = EXPECTED.captures(text) {
        info.set_expected(capture_text(&caps, 1));
    }
    if let Some(caps) = FOUND.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }

    info
}

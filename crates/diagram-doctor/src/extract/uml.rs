//! UML-like language errors (PlantUML, C4-PlantUML, Structurizr DSL).
//!
//! PlantUML answers a document without `@startuml` with its welcome banner instead of an error,
//! so the banner itself is the signal for the missing start declaration.

use super::ExtractedInfo;
use crate::text::{capture_number, capture_text, regex};
use regex::Regex;
use std::sync::LazyLock;

static MISSING_START: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)welcome to plantuml|no @startuml found|missing @startuml"));
static MISSING_END: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)no @enduml found|missing @enduml"));
static ERROR_LINE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\berror line (\d+)"));
static LINE_PAREN: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\(line:?\s*(\d+)\)"));
// Structurizr echoes the offending line after the position.
static AT_LINE_ECHO: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\bat line (\d+)(?: of [^:\n]+)?:[ \t]*([^\n]*)"));
static LINE_ANY: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bline\s*:?\s*(\d+)"));
static EXPECTED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?i)\bexpected:?\s+'([^']+)'"));
static FOUND: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?i)\b(?:found|got|unexpected tokens?)\s*:?\s+'([^']+)'"));

pub(crate) fn extract(text: &str) -> ExtractedInfo {
    let mut info = ExtractedInfo::default();

    if MISSING_START.is_match(text) {
        info.set_position(Some(1), Some(1));
        info.set_expected(Some("@startuml".to_string()));
        return info;
    }
    if MISSING_END.is_match(text) {
        info.set_expected(Some("@enduml".to_string()));
    }

    if let Some(caps) = ERROR_LINE.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    } else if let Some(caps) = LINE_PAREN.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    } else if let Some(caps) = AT_LINE_ECHO.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
        info.set_near(capture_text(&caps, 2).map(|near| near.trim().to_string()));
    } else if let Some(caps) = LINE_ANY.captures(text) {
        info.set_position(capture_number(&caps, 1), None);
    }

    if let Some(caps) = EXPECTED.captures(text) {
        info.set_expected(capture_text(&caps, 1));
    }
    if let Some(caps) = FOUND.captures(text) {
        info.set_found(capture_text(&caps, 1));
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_banner() {
        let info = extract("Welcome to PlantUML!\nYou can start with a simple UML Diagram like:");
        assert_eq!(info.line, Some(1));
        assert_eq!(info.column, Some(1));
        assert_eq!(info.expected.as_deref(), Some("@startuml"));
    }

    #[test]
    fn test_missing_end() {
        let info = extract("Error: No @enduml found");
        assert_eq!(info.line, None);
        assert_eq!(info.expected.as_deref(), Some("@enduml"));
    }

    #[test]
    fn test_error_line() {
        let info = extract("Error line 5 in file: diagram.puml\nSyntax Error?");
        assert_eq!(info.line, Some(5));
        assert_eq!(info.column, None);
    }

    #[test]
    fn test_line_in_parens() {
        let info = extract("Syntax Error? (Assumed diagram type: sequence) (line: 3)");
        assert_eq!(info.line, Some(3));
    }

    #[test]
    fn test_structurizr_echo() {
        let info = extract("Unexpected tokens at line 4 of workspace.dsl: softwareSystem \"x\" {{");
        assert_eq!(info.line, Some(4));
        assert_eq!(info.near.as_deref(), Some("softwareSystem \"x\" {{"));
    }

    #[test]
    fn test_garbage() {
        assert!(extract("").is_empty());
        assert!(extract("???").is_empty());
    }
}

//! Error classification.
//!
//! Assigns every error a stable `<format>-<category>` code and a one-line summary. Rules are an
//! ordered list evaluated until the first match; the order is part of the contract (a JSON
//! "unexpected token" must stay `invalid-json`, not `unexpected-token`).

use crate::extract::ExtractedInfo;
use crate::text::{first_line, regex};
use crate::tokens::{Delimiter, delimiter_for_token, display_token};
use diagram_doctor_lang::{DiagramFormat, FormatFamily, code_prefix};
use regex::Regex;
use std::sync::LazyLock;

/// Error categories, the suffix of a category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A `]` is missing.
    MissingBracket,
    /// A `)` is missing.
    MissingParen,
    /// A `}` is missing.
    MissingBrace,
    /// The mandatory start declaration is missing.
    MissingStart,
    /// The mandatory end declaration (or block terminator) is missing.
    MissingEnd,
    /// The compiler could not tell which kind of diagram this is.
    NoDiagramType,
    /// An XML element was never closed.
    UnclosedTag,
    /// The XML is not well-formed.
    MalformedXml,
    /// The JSON document does not parse.
    InvalidJson,
    /// The YAML document does not parse.
    InvalidYaml,
    /// An arrow / link / edge operator is not valid here.
    InvalidArrow,
    /// An unexpected token or character.
    UnexpectedToken,
    /// An unspecified syntax error.
    SyntaxError,
    /// Nothing more specific matched.
    Generic,
}

impl ErrorCategory {
    /// Every category, in rule order.
    pub const ALL: [ErrorCategory; 14] = [
        Self::MissingBracket,
        Self::MissingParen,
        Self::MissingBrace,
        Self::MissingStart,
        Self::MissingEnd,
        Self::NoDiagramType,
        Self::UnclosedTag,
        Self::MalformedXml,
        Self::InvalidJson,
        Self::InvalidYaml,
        Self::InvalidArrow,
        Self::UnexpectedToken,
        Self::SyntaxError,
        Self::Generic,
    ];

    /// The code suffix.
    pub fn slug(self) -> &'static str {
        match self {
            Self::MissingBracket => "missing-bracket",
            Self::MissingParen => "missing-paren",
            Self::MissingBrace => "missing-brace",
            Self::MissingStart => "missing-start",
            Self::MissingEnd => "missing-end",
            Self::NoDiagramType => "no-diagram-type",
            Self::UnclosedTag => "unclosed-tag",
            Self::MalformedXml => "malformed-xml",
            Self::InvalidJson => "invalid-json",
            Self::InvalidYaml => "invalid-yaml",
            Self::InvalidArrow => "invalid-arrow",
            Self::UnexpectedToken => "unexpected-token",
            Self::SyntaxError => "syntax-error",
            Self::Generic => "generic-error",
        }
    }

    /// Resolve a category from a full code (`mermaid-missing-bracket`) or a bare slug.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .filter(|category| code == category.slug() || code.ends_with(&format!("-{}", category.slug())))
            .max_by_key(|category| category.slug().len())
    }

    /// Categories defined by the absence of a whole construct. Their canned summary says more
    /// than the structured fields would.
    fn is_declaration_level(self) -> bool {
        matches!(self, Self::MissingStart | Self::MissingEnd | Self::NoDiagramType)
    }

    /// The canned summary for this category, if it has one.
    pub fn canned_message(self, diagram_type: &str) -> Option<String> {
        let format = DiagramFormat::from_tag(diagram_type);
        let markers = format.map(DiagramFormat::markers).unwrap_or_default();
        let message = match self {
            Self::MissingBracket => "Missing closing bracket ']'".to_string(),
            Self::MissingParen => "Missing closing parenthesis ')'".to_string(),
            Self::MissingBrace => "Missing closing brace '}'".to_string(),
            Self::MissingStart => match markers.start {
                Some(start) if markers.has_start() => {
                    format!("Missing {} declaration", start.trim_end_matches(" {"))
                }
                _ => "Missing start declaration".to_string(),
            },
            Self::MissingEnd => match markers.end {
                Some(end) if markers.has_end() => format!("Missing {end} declaration"),
                _ => "Missing 'end' to close a block".to_string(),
            },
            Self::NoDiagramType => "No diagram type detected".to_string(),
            Self::UnclosedTag => "Unclosed XML tag".to_string(),
            Self::MalformedXml => "Malformed XML".to_string(),
            Self::InvalidJson => "Invalid JSON".to_string(),
            Self::InvalidYaml => "Invalid YAML".to_string(),
            Self::InvalidArrow => "Invalid arrow or link syntax".to_string(),
            Self::UnexpectedToken => "Unexpected token".to_string(),
            Self::SyntaxError => "Syntax error".to_string(),
            Self::Generic => return None,
        };
        Some(message)
    }
}

/// The classifier's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Matched category.
    pub category: ErrorCategory,
    /// `<format>-<category>` code.
    pub code: String,
    /// One-line summary.
    pub short_message: String,
}

struct ClassificationRule {
    category: ErrorCategory,
    /// Families the rule applies to; `None` means every format, including unknown tags.
    families: Option<&'static [FormatFamily]>,
    pattern: Regex,
}

impl ClassificationRule {
    fn new(
        category: ErrorCategory,
        families: Option<&'static [FormatFamily]>,
        pattern: &str,
    ) -> Self {
        Self {
            category,
            families,
            pattern: regex(pattern),
        }
    }

    fn applies(&self, family: Option<FormatFamily>, lowered: &str) -> bool {
        let in_scope = match (self.families, family) {
            (None, _) => true,
            (Some(families), Some(family)) => families.contains(&family),
            (Some(_), None) => false,
        };
        in_scope && self.pattern.is_match(lowered)
    }
}

const UML: &[FormatFamily] = &[FormatFamily::UmlLike];
const FLOW: &[FormatFamily] = &[FormatFamily::FlowSequence];
const XML: &[FormatFamily] = &[FormatFamily::Xml];
const JSON: &[FormatFamily] = &[FormatFamily::Json];
const YAML: &[FormatFamily] = &[FormatFamily::Yaml];

// Patterns run against the lowercased message.
static RULES: LazyLock<Vec<ClassificationRule>> = LazyLock::new(|| {
    use ErrorCategory::*;
    vec![
        ClassificationRule::new(
            MissingBracket,
            None,
            r"missing (?:closing )?(?:square )?bracket|unclosed (?:square )?bracket|expecting 'sqe'",
        ),
        ClassificationRule::new(
            MissingParen,
            None,
            r"missing (?:closing )?paren|unclosed paren|expecting 'pe'",
        ),
        ClassificationRule::new(
            MissingBrace,
            None,
            r"missing (?:closing )?(?:curly )?brace|unclosed (?:curly )?brace|expecting 'diamond_stop'",
        ),
        ClassificationRule::new(
            MissingStart,
            Some(UML),
            r"welcome to plantuml|no @startuml|missing @startuml",
        ),
        ClassificationRule::new(MissingEnd, Some(UML), r"no @enduml|missing @enduml"),
        ClassificationRule::new(
            MissingEnd,
            Some(FLOW),
            r"expecting [^\n]*'end'[^\n]*got 'eof'|unclosed subgraph|missing 'end'",
        ),
        ClassificationRule::new(
            NoDiagramType,
            None,
            r"no diagram type detected|unknown diagram type|diagram type not found",
        ),
        ClassificationRule::new(
            UnclosedTag,
            Some(XML),
            r"unclosed (?:root )?(?:tag|element)|must be terminated by the matching end-tag",
        ),
        ClassificationRule::new(
            MalformedXml,
            Some(XML),
            r"malformed|not well-formed|unparsable content|unexpected close tag|non-whitespace before first tag|content is not allowed in prolog|invalid xml",
        ),
        ClassificationRule::new(
            InvalidJson,
            Some(JSON),
            r"json|unexpected token|unexpected end of|expected (?:double-quoted )?property name|bad control character",
        ),
        ClassificationRule::new(
            InvalidYaml,
            Some(YAML),
            r"bad indentation|mapping values are not allowed|could not find expected|while parsing|while scanning|duplicated mapping key",
        ),
        ClassificationRule::new(
            UnexpectedToken,
            None,
            r"unexpected (?:token|character|text)|unrecognized text|lexical error|unexpected '",
        ),
        ClassificationRule::new(
            InvalidArrow,
            None,
            r"invalid (?:arrow|link|edge)|unknown arrow|got '(?:link|arrow\w*)'|near '-[->]'",
        ),
        ClassificationRule::new(SyntaxError, None, r"syntax error|parse error"),
    ]
});

/// Structural shortcut: a missing closing delimiter named by the parser itself.
fn category_for_expected(expected: Option<&str>) -> Option<ErrorCategory> {
    match delimiter_for_token(expected?)? {
        Delimiter::CloseSquare => Some(ErrorCategory::MissingBracket),
        Delimiter::CloseParen => Some(ErrorCategory::MissingParen),
        Delimiter::CloseBrace => Some(ErrorCategory::MissingBrace),
        _ => None,
    }
}

/// Pick the category for an error. Always succeeds; [`ErrorCategory::Generic`] is the floor.
pub fn categorize(error_text: &str, diagram_type: &str, info: &ExtractedInfo) -> ErrorCategory {
    if let Some(category) = category_for_expected(info.expected.as_deref()) {
        return category;
    }

    let lowered = error_text.to_lowercase();
    let family = diagram_doctor_lang::family_for_tag(diagram_type);
    RULES
        .iter()
        .find(|rule| rule.applies(family, &lowered))
        .map_or(ErrorCategory::Generic, |rule| rule.category)
}

/// Summarize from structured fields, in priority order:
/// expected and found, expected only, found only, near only.
pub fn message_from_fields(info: &ExtractedInfo) -> Option<String> {
    let expected = info.expected.as_deref().map(display_token);
    match (expected, info.found.as_deref(), info.near.as_deref()) {
        (Some(expected), Some(found), _) => Some(format!("Expected '{expected}' but found '{found}'")),
        (Some(expected), None, _) => Some(format!("Expected '{expected}'")),
        (None, Some(found), _) => Some(format!("Unexpected '{found}'")),
        (None, None, Some(near)) => Some(format!("Error near '{near}'")),
        (None, None, None) => None,
    }
}

/// Classify an error into a code and a one-line summary.
pub fn classify(error_text: &str, diagram_type: &str, info: &ExtractedInfo) -> Classification {
    let category = categorize(error_text, diagram_type, info);
    let code = format!("{}-{}", code_prefix(diagram_type), category.slug());

    let canned = category.canned_message(diagram_type);
    let short_message = if category.is_declaration_level() {
        canned.or_else(|| message_from_fields(info))
    } else {
        message_from_fields(info).or(canned)
    }
    .unwrap_or_else(|| raw_summary(error_text));

    Classification {
        category,
        code,
        short_message,
    }
}

fn raw_summary(error_text: &str) -> String {
    let line = first_line(error_text);
    if line.is_empty() {
        "Unknown error".to_string()
    } else {
        line.to_string()
    }
}

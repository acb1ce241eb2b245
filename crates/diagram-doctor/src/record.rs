//! Structured error records.
//!
//! An [`ErrorRecord`] is built fresh for every failed validation and never mutated afterwards.
//! It carries whatever position and cause information could be recovered from the raw compiler
//! message, the classifier's verdict, and the candidate fixes.

use serde::{Deserialize, Serialize};

/// End-column sentinel meaning "to the end of the line".
pub const REST_OF_LINE_COLUMN: usize = 1000;

/// Line sentinel meaning "after the last line of the document".
///
/// Edits targeting this line are applied as a pure append, so fix builders can target content
/// that does not exist yet without knowing the document's line count.
pub const END_OF_DOCUMENT_LINE: usize = 1_000_000;

/// A text replacement in 1-based line/column coordinates (end exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    /// First line of the replaced range.
    pub start_line: usize,
    /// First column of the replaced range.
    pub start_column: usize,
    /// Last line of the replaced range.
    pub end_line: usize,
    /// Column just past the replaced range.
    pub end_column: usize,
    /// Replacement text (may contain newlines).
    pub text: String,
}

impl TextEdit {
    /// A zero-width insertion at `(line, column)`.
    pub fn insert(line: usize, column: usize, text: impl Into<String>) -> Self {
        Self {
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
            text: text.into(),
        }
    }

    /// An append after the last line of the document.
    pub fn append(text: impl Into<String>) -> Self {
        Self::insert(END_OF_DOCUMENT_LINE, 1, text)
    }

    /// Returns `true` if this edit targets the end-of-document sentinel.
    pub fn is_append(&self) -> bool {
        self.start_line >= END_OF_DOCUMENT_LINE
    }
}

/// A candidate repair for an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSuggestion {
    /// Short label, unique within one suggestion list.
    pub title: String,
    /// Longer explanation.
    pub description: Option<String>,
    /// Whether this is the default fix to offer.
    pub is_preferred: bool,
    /// Mechanical edit, absent for advisory-only suggestions.
    pub edit: Option<TextEdit>,
}

impl FixSuggestion {
    /// A mechanically applicable suggestion.
    pub fn with_edit(title: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_preferred: false,
            edit: Some(edit),
        }
    }

    /// An advisory suggestion the user has to apply by hand.
    pub fn advisory(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            is_preferred: false,
            edit: None,
        }
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as the preferred fix.
    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }

    /// Returns `true` if the suggestion carries an edit.
    pub fn is_applicable(&self) -> bool {
        self.edit.is_some()
    }
}

/// Structured information about a single diagram error.
///
/// Invariants: `line` set implies `column` set, and `column` set implies `end_column` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// 1-based line of the error.
    pub line: Option<usize>,
    /// 1-based column of the error.
    pub column: Option<usize>,
    /// Column just past the offending span ([`REST_OF_LINE_COLUMN`] if unknown).
    pub end_column: Option<usize>,
    /// Token or construct the parser wanted.
    pub expected: Option<String>,
    /// Token or text actually encountered.
    pub found: Option<String>,
    /// Text surrounding the failure.
    pub near: Option<String>,
    /// Character offset into the source.
    pub offset: Option<usize>,
    /// Raw compiler message, verbatim.
    pub message: String,
    /// One-line human-readable summary.
    pub short_message: Option<String>,
    /// Stable `<format>-<category>` code.
    pub code: Option<String>,
    /// Format tag supplied by the caller.
    pub diagram_type: String,
    /// Candidate repairs, preferred first where the engine knows one.
    pub suggestions: Vec<FixSuggestion>,
}

impl ErrorRecord {
    /// Returns `true` if the error could be positioned on a line.
    pub fn is_positioned(&self) -> bool {
        self.line.is_some()
    }

    /// The first preferred suggestion, falling back to the first suggestion.
    pub fn preferred_fix(&self) -> Option<&FixSuggestion> {
        self.suggestions
            .iter()
            .find(|s| s.is_preferred)
            .or_else(|| self.suggestions.first())
    }

    /// The summary to show users: the short message if one was derived, else the raw message.
    pub fn display_message(&self) -> &str {
        self.short_message.as_deref().unwrap_or(&self.message)
    }
}

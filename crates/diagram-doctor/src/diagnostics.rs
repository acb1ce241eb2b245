//! Editor-facing diagnostics.
//!
//! Two shapes are produced from a positioned [`ErrorRecord`]:
//! - [`DiagnosticMarker`]: 1-based line/column coordinates, for gutter markers and squiggles
//! - [`Diagnostic`]: a character-offset range, for hosts that index text by offset
//!
//! An error without a line is never shown inline; both conversions return `None` for it.

use crate::position::SourceIndex;
use crate::record::{ErrorRecord, REST_OF_LINE_COLUMN};
use serde::{Deserialize, Serialize};

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Error diagnostics.
    Error,
    /// Warning diagnostics.
    Warning,
    /// Informational diagnostics.
    Information,
    /// Hint diagnostics.
    Hint,
}

/// A display-ready marker in 1-based line/column coordinates (end column exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticMarker {
    /// Marker start line.
    pub start_line: usize,
    /// Marker start column.
    pub start_column: usize,
    /// Marker end line.
    pub end_line: usize,
    /// Marker end column.
    pub end_column: usize,
    /// Text to show on hover.
    pub message: String,
    /// Always [`DiagnosticSeverity::Error`] for diagram errors.
    pub severity: DiagnosticSeverity,
    /// Category code, if classified.
    pub code: Option<String>,
    /// Diagram format tag that produced the error.
    pub source: String,
}

/// Convert a record into a marker. The end column may be [`REST_OF_LINE_COLUMN`]; hosts clamp it
/// to the line, or use [`to_marker_in`] when the source is at hand.
pub fn to_marker(record: &ErrorRecord) -> Option<DiagnosticMarker> {
    let line = record.line?;
    let start_column = record.column.unwrap_or(1);
    let end_column = record
        .end_column
        .unwrap_or(REST_OF_LINE_COLUMN)
        .max(start_column);

    Some(DiagnosticMarker {
        start_line: line,
        start_column,
        end_line: line,
        end_column,
        message: record.display_message().to_string(),
        severity: DiagnosticSeverity::Error,
        code: record.code.clone(),
        source: record.diagram_type.clone(),
    })
}

/// Like [`to_marker`], with coordinates clamped to `source`: the line to the document and the
/// columns to the line's length + 1.
pub fn to_marker_in(record: &ErrorRecord, source: &str) -> Option<DiagnosticMarker> {
    let mut marker = to_marker(record)?;
    let index = SourceIndex::from_text(source);

    let line = marker.start_line.clamp(1, index.line_count());
    let limit = index.line_len(line) + 1;
    marker.start_line = line;
    marker.end_line = line;
    marker.start_column = marker.start_column.min(limit);
    marker.end_column = marker.end_column.clamp(marker.start_column, limit);
    Some(marker)
}

/// A half-open character-offset range (`start..end`) in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRange {
    /// Range start offset (inclusive), in Unicode scalar values (`char`) from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in Unicode scalar values (`char`) from the start of the document.
    pub end: usize,
}

impl DiagnosticRange {
    /// Create a new diagnostic range.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A single diagnostic item for the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic range in character offsets.
    pub range: DiagnosticRange,
    /// Diagnostic severity.
    pub severity: DiagnosticSeverity,
    /// Category code.
    pub code: Option<String>,
    /// Diagram format tag.
    pub source: Option<String>,
    /// Diagnostic message.
    pub message: String,
}

/// Convert a record into an offset-range diagnostic against `source`.
pub fn to_diagnostic(record: &ErrorRecord, source: &str) -> Option<Diagnostic> {
    let marker = to_marker_in(record, source)?;
    let index = SourceIndex::from_text(source);
    let start = index.position_to_offset(marker.start_line, marker.start_column);
    let end = index.position_to_offset(marker.end_line, marker.end_column);

    Some(Diagnostic {
        range: DiagnosticRange::new(start, end.max(start)),
        severity: marker.severity,
        code: marker.code,
        source: Some(marker.source),
        message: marker.message,
    })
}

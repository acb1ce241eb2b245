#![warn(missing_docs)]
//! Diagram Doctor - Headless Diagnostics for Textual Diagram Languages
//!
//! # Overview
//!
//! `diagram-doctor` turns the free-text error messages of diagram compilers (Mermaid, PlantUML,
//! Graphviz, D2, BPMN, Vega-Lite, WireViz, ...) into structured, positioned, classified errors
//! with candidate fixes. It does not render anything and owns no network or UI code; the host
//! supplies the raw error text and, when it has it, the diagram source.
//!
//! # Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  analyze_error                              │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Fix suggestions (token / format / generic) │  ← Quick fixes
//! ├─────────────────────────────────────────────┤
//! │  Classifier (<format>-<category> codes)     │  ← Summaries
//! ├─────────────────────────────────────────────┤
//! │  Extractors (7 families + fallback)         │  ← Position & cause
//! ├─────────────────────────────────────────────┤
//! │  Position converter (Rope-based)            │  ← Offsets ↔ lines
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use diagram_doctor::{analyze_error, apply_fix};
//!
//! let source = "flowchart TD\n    A[Start --> B";
//! let error = "Parse error on line 2:\n...TD    A[Start --> B\n---------------------^\nExpecting 'SQE', 'PE', got 'EOF'";
//!
//! let record = analyze_error(error, "mermaid", Some(source));
//! assert_eq!(record.line, Some(2));
//! assert_eq!(record.code.as_deref(), Some("mermaid-missing-bracket"));
//!
//! let fix = record.preferred_fix().unwrap();
//! assert_eq!(fix.title, "Insert ']'");
//! let fixed = apply_fix(source, fix);
//! assert!(fixed.contains(']'));
//! ```
//!
//! # Module Description
//!
//! - [`position`] - offset / line-column conversion
//! - [`extract`] - per-family error extractors and the generic fallback
//! - [`classify`] - ordered classification rules
//! - [`fixes`] - fix-suggestion engine and edit application
//! - [`explain`] - help text for category codes
//! - [`diagnostics`] - editor markers and offset-range diagnostics
//! - [`unhandled`] - bounded log of errors that could not be positioned
//! - [`store`] - key-value storage backing the log
//!
//! # Coordinates
//!
//! Lines and columns are 1-based and count Unicode scalar values (`char`). Only `'\n'` ends a
//! line.

pub mod analyze;
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod explain;
pub mod extract;
pub mod fixes;
pub mod position;
pub mod record;
pub mod store;
mod text;
pub mod tokens;
pub mod unhandled;

pub use analyze::analyze_error;
pub use classify::{Classification, ErrorCategory, classify};
pub use diagnostics::{
    Diagnostic, DiagnosticMarker, DiagnosticRange, DiagnosticSeverity, to_diagnostic, to_marker,
    to_marker_in,
};
pub use error::StoreError;
pub use explain::{ExplanationEntry, explain};
pub use extract::{ExtractedInfo, extract, extract_generic, extract_specific};
pub use fixes::{apply_fix, apply_text_edits, get_fix_suggestions};
pub use position::{SourceIndex, line_column_to_offset, offset_to_line_column};
pub use record::{END_OF_DOCUMENT_LINE, ErrorRecord, FixSuggestion, REST_OF_LINE_COLUMN, TextEdit};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tokens::{Delimiter, delimiter_for_token, display_token};
pub use unhandled::{
    FormatGroup, LogOutcome, LogStats, ParsedSummary, UnhandledErrorEntry, UnhandledErrorLog,
    UnhandledLogConfig,
};

pub use diagram_doctor_lang::{DiagramFormat, FormatFamily};

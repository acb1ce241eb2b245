//! Error extraction.
//!
//! Diagram compilers report failures as free text in wildly different shapes. Each
//! [`FormatFamily`] has one extractor that knows its compilers' shapes; a generic fallback runs
//! when the family extractor cannot find a line. Every extractor is total: garbage in yields an
//! empty [`ExtractedInfo`], never a panic.
//!
//! Within an extractor, position patterns are tried in a fixed priority order and the first one
//! that yields a line wins. Supplementary fields (`expected`, `found`, `near`) are collected
//! independently, but never overwrite a field that is already set.

mod ascii;
mod fallback;
mod graph;
mod json;
mod mermaid;
mod uml;
mod xml;
mod yaml;

use crate::position::offset_to_line_column;
use diagram_doctor_lang::{FormatFamily, family_for_tag};
use tracing::debug;

pub use fallback::extract as extract_generic;

/// Partial position/cause information recovered from an error message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedInfo {
    /// 1-based line.
    pub line: Option<usize>,
    /// 1-based column.
    pub column: Option<usize>,
    /// Token or construct the parser wanted (raw token name as reported).
    pub expected: Option<String>,
    /// Token or text actually encountered.
    pub found: Option<String>,
    /// Text surrounding the failure.
    pub near: Option<String>,
    /// Character offset into the source.
    pub offset: Option<usize>,
}

impl ExtractedInfo {
    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fill every absent field from `other`; fields already set are kept.
    pub fn merge_missing(&mut self, other: ExtractedInfo) {
        if self.line.is_none() && other.line.is_some() {
            self.line = other.line;
            self.column = other.column;
        }
        fill(&mut self.expected, other.expected);
        fill(&mut self.found, other.found);
        fill(&mut self.near, other.near);
        self.offset = self.offset.or(other.offset);
    }

    /// Record a position unless a line is already known. Zero coordinates are lifted to 1.
    pub(crate) fn set_position(&mut self, line: Option<usize>, column: Option<usize>) {
        if self.line.is_some() {
            return;
        }
        if let Some(line) = line {
            self.line = Some(line.max(1));
            self.column = column.map(|c| c.max(1));
        }
    }

    pub(crate) fn set_expected(&mut self, value: Option<String>) {
        fill(&mut self.expected, value);
    }

    pub(crate) fn set_found(&mut self, value: Option<String>) {
        fill(&mut self.found, value);
    }

    pub(crate) fn set_near(&mut self, value: Option<String>) {
        fill(&mut self.near, value);
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value.filter(|v| !v.is_empty());
    }
}

/// The extractor routine for a family.
pub fn extractor_for(family: FormatFamily) -> fn(&str) -> ExtractedInfo {
    match family {
        FormatFamily::FlowSequence => mermaid::extract,
        FormatFamily::UmlLike => uml::extract,
        FormatFamily::GraphDescription => graph::extract,
        FormatFamily::Xml => xml::extract,
        FormatFamily::Json => json::extract,
        FormatFamily::Yaml => yaml::extract,
        FormatFamily::AsciiArt => ascii::extract,
    }
}

/// Run only the format-specific extractor for `diagram_type`.
///
/// Unknown tags have no specific extractor and yield an empty result.
pub fn extract_specific(diagram_type: &str, error_text: &str) -> ExtractedInfo {
    match family_for_tag(diagram_type) {
        Some(family) => extractor_for(family)(error_text),
        None => ExtractedInfo::default(),
    }
}

/// Full extraction: the format-specific extractor, then offset conversion against `source` when
/// only an offset is known, then the generic fallback if no line was found.
pub fn extract(diagram_type: &str, error_text: &str, source: Option<&str>) -> ExtractedInfo {
    let mut info = extract_specific(diagram_type, error_text);

    if info.line.is_none()
        && let (Some(offset), Some(source)) = (info.offset, source)
    {
        let (line, column) = offset_to_line_column(source, offset);
        info.set_position(Some(line), Some(column));
    }

    if info.line.is_none() {
        let generic = fallback::extract(error_text);
        debug!(
            diagram_type,
            generic_line = ?generic.line,
            "format extractor found no line, using generic fallback"
        );
        info.merge_missing(generic);
    }

    info
}

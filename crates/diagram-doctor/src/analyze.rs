//! The analysis pipeline: raw compiler message in, complete [`ErrorRecord`] out.

use crate::classify::classify;
use crate::extract::{ExtractedInfo, extract};
use crate::fixes::get_fix_suggestions;
use crate::record::{ErrorRecord, REST_OF_LINE_COLUMN};
use crate::text::is_grammar_token_name;
use crate::tokens::display_token;
use tracing::debug;

/// Analyze a raw error message.
///
/// Runs extraction (with offset conversion when `source` is given), classification and fix
/// suggestion, and returns a record whose positional invariants hold: a line implies a column,
/// and a column implies an end column.
pub fn analyze_error(error_text: &str, diagram_type: &str, source: Option<&str>) -> ErrorRecord {
    let info = extract(diagram_type, error_text, source);
    let classification = classify(error_text, diagram_type, &info);
    let suggestions = get_fix_suggestions(error_text, diagram_type, info.line, &info);

    let column = info.line.map(|_| info.column.unwrap_or(1));
    let end_column = column.map(|column| span_end(column, &info));

    debug!(
        diagram_type,
        line = ?info.line,
        column = ?column,
        code = %classification.code,
        suggestions = suggestions.len(),
        "analyzed diagram error"
    );

    ErrorRecord {
        line: info.line,
        column,
        end_column,
        expected: info.expected.as_deref().map(|e| display_token(e).to_string()),
        found: info.found,
        near: info.near,
        offset: info.offset,
        message: error_text.to_string(),
        short_message: Some(classification.short_message),
        code: Some(classification.code),
        diagram_type: diagram_type.to_string(),
        suggestions,
    }
}

/// End of the offending span: the width of the found text, else of the nearby text, else the
/// rest of the line. Grammar token names such as `EOF` are not source text and do not count.
fn span_end(column: usize, info: &ExtractedInfo) -> usize {
    [info.found.as_deref(), info.near.as_deref()]
        .into_iter()
        .flatten()
        .find(|text| !is_grammar_token_name(text))
        .map_or(REST_OF_LINE_COLUMN, |text| column.saturating_add(text.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_pointer_record() {
        let text = "Parse error on line 2:\n...TD    A[Start --> B[End]\n----------------------^\nExpecting 'SQE', 'PE', got 'EOF'";
        let record = analyze_error(text, "mermaid", None);
        assert_eq!(record.line, Some(2));
        assert_eq!(record.column, Some(23));
        assert_eq!(record.end_column, Some(REST_OF_LINE_COLUMN));
        assert_eq!(record.expected.as_deref(), Some("]"));
        assert_eq!(record.found.as_deref(), Some("EOF"));
        assert_eq!(record.code.as_deref(), Some("mermaid-missing-bracket"));
        assert_eq!(record.short_message.as_deref(), Some("Expected ']' but found 'EOF'"));
        assert_eq!(record.message, text);
        assert!(record.suggestions[0].is_preferred);
    }

    #[test]
    fn test_end_column_from_near() {
        let record = analyze_error("Error: <stdin>: syntax error in line 3 near '->'", "graphviz", None);
        assert_eq!(record.line, Some(3));
        assert_eq!(record.column, Some(1));
        assert_eq!(record.end_column, Some(3));
    }

    #[test]
    fn test_end_column_from_found() {
        let record = analyze_error("got unexpected token: 3,5-3,6: Op '}'", "blockdiag", None);
        assert_eq!(record.column, Some(5));
        assert_eq!(record.end_column, Some(6));
    }

    #[test]
    fn test_offset_converted_with_source() {
        let source = "{\n  \"a\": 1,\n}";
        let record = analyze_error("Unexpected token } in JSON at position 12", "vega", Some(source));
        assert_eq!(record.offset, Some(12));
        assert_eq!(record.line, Some(3));
        assert_eq!(record.column, Some(1));
        assert_eq!(record.end_column, Some(2));
        assert_eq!(record.code.as_deref(), Some("vega-invalid-json"));
    }

    #[test]
    fn test_huge_column_saturates() {
        let text = "Parse error at line 1 column 18446744073709551615, expected '>' but got 'x'";
        let record = analyze_error(text, "nomnoml", Some("a -> b"));
        assert_eq!(record.line, Some(1));
        assert_eq!(record.column, Some(usize::MAX));
        assert_eq!(record.end_column, Some(usize::MAX));

        let diagnostic = crate::diagnostics::to_diagnostic(&record, "a -> b").unwrap();
        assert_eq!(diagnostic.range, crate::diagnostics::DiagnosticRange::new(6, 6));
    }

    #[test]
    fn test_unpositioned_record() {
        let record = analyze_error("Unexpected end of JSON input", "vegalite", None);
        assert_eq!(record.line, None);
        assert_eq!(record.column, None);
        assert_eq!(record.end_column, None);
        assert_eq!(record.code.as_deref(), Some("vegalite-invalid-json"));
        assert_eq!(record.short_message.as_deref(), Some("Invalid JSON"));
    }
}

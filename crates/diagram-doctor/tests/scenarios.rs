use diagram_doctor::{
    ErrorCategory, LogOutcome, MemoryStore, REST_OF_LINE_COLUMN, TextEdit, UnhandledErrorLog,
    analyze_error, apply_fix, explain, extract, get_fix_suggestions, offset_to_line_column,
    to_marker_in,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_flow_pointer_position() {
    let text = "Parse error on line 2:\n...TD    A[Start --> B[End]\n----------------------^";
    let info = extract("mermaid", text, None);
    assert_eq!(info.line, Some(2));
    assert_eq!(info.column, Some(23));
}

#[test]
fn test_expecting_got_token_fix() {
    let text = "Expecting 'SQE', 'PE', got 'EOF'";
    let info = extract("mermaid", text, None);
    assert_eq!(info.expected.as_deref(), Some("SQE"));
    assert_eq!(info.found.as_deref(), Some("EOF"));

    // Position known from an earlier line of the message.
    let info = extract("mermaid", &format!("Parse error on line 4:\n  A[x\n----^\n{text}"), None);
    let suggestions = get_fix_suggestions(text, "mermaid", info.line, &info);
    let first = &suggestions[0];
    assert!(first.is_preferred);
    assert_eq!(first.edit, Some(TextEdit::insert(4, 5, "]")));
}

#[test]
fn test_plantuml_missing_start() {
    let record = analyze_error("Welcome to PlantUML", "plantuml", None);
    assert_eq!(record.code.as_deref(), Some("plantuml-missing-start"));
    assert_eq!(record.short_message.as_deref(), Some("Missing @startuml declaration"));
    assert_eq!(record.line, Some(1));
    assert_eq!(record.column, Some(1));

    let fix = record.preferred_fix().unwrap();
    assert_eq!(fix.edit, Some(TextEdit::insert(1, 1, "@startuml\n")));
    assert_eq!(
        apply_fix("Alice -> Bob\n@enduml", fix),
        "@startuml\nAlice -> Bob\n@enduml"
    );

    assert_eq!(explain(record.code.as_deref().unwrap_or_default(), &record.message).title, "Missing @startuml");
}

#[test]
fn test_json_offset_resolves_against_source() {
    let source = "{\n  \"mark\": \"bar\",\n  \"encoding\": {\n    \"x\": {\"field\": \"a\",}\n  }\n}";
    assert_eq!(source.chars().nth(58), Some('}'));
    let text = "Unexpected token } in JSON at position 58";

    let record = analyze_error(text, "vegalite", Some(source));
    assert_eq!(record.offset, Some(58));
    let (line, column) = (record.line.unwrap(), record.column.unwrap());
    assert_eq!((line, column), offset_to_line_column(source, 58));

    let line_text = source.split('\n').nth(line - 1).unwrap();
    assert_eq!(line_text.chars().nth(column - 1), Some('}'));
    assert_eq!((line, column), (4, 24));
    assert_eq!(record.end_column, Some(25));
    assert_eq!(record.code.as_deref(), Some("vegalite-invalid-json"));
}

#[test]
fn test_json_offset_without_source_stays_unpositioned() {
    let record = analyze_error("Unexpected token } in JSON at position 42", "vegalite", None);
    assert_eq!(record.offset, Some(42));
    assert_eq!(record.line, None);
    assert_eq!(to_marker_in(&record, "{}"), None);
}

#[test]
fn test_logger_hour_window() {
    let log = UnhandledErrorLog::with_defaults(Arc::new(MemoryStore::new()));
    let text = "the renderer returned nothing useful";
    let record = analyze_error(text, "nomnoml", None);
    assert_eq!(record.line, None);

    let start = chrono::Utc::now();
    for i in 0..5 {
        log.log_at(start + chrono::Duration::minutes(i * 10), text, "nomnoml", &record);
    }
    assert_eq!(log.entries().len(), 1);

    let outcome = log.log_at(start + chrono::Duration::minutes(61), text, "nomnoml", &record);
    assert_eq!(outcome, LogOutcome::Stored { evicted: 0 });
    assert_eq!(log.entries().len(), 2);
}

#[test]
fn test_marker_for_missing_bracket() {
    let source = "flowchart TD\n    A[Start --> B";
    let text = "Parse error on line 2:\n...TD    A[Start --> B\n---------------------^\nExpecting 'SQE', 'PE', got 'EOF'";
    let record = analyze_error(text, "mermaid", Some(source));
    assert_eq!(ErrorCategory::from_code(record.code.as_deref().unwrap()), Some(ErrorCategory::MissingBracket));
    assert_eq!(record.end_column, Some(REST_OF_LINE_COLUMN));

    let marker = to_marker_in(&record, source).unwrap();
    assert_eq!((marker.start_line, marker.start_column, marker.end_column), (2, 18, 18));
    assert_eq!(marker.message, "Expected ']' but found 'EOF'");
}

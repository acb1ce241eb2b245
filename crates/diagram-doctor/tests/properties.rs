use diagram_doctor::{
    DiagramFormat, ExtractedInfo, MemoryStore, UnhandledErrorLog, UnhandledLogConfig,
    analyze_error, classify, extract_generic, extract_specific, get_fix_suggestions,
    line_column_to_offset, offset_to_line_column,
};
use diagram_doctor_lang::code_prefix;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn any_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::sample::select(DiagramFormat::ALL.to_vec()).prop_map(|f| f.tag().to_string()),
        "[a-z]{1,8}",
    ]
}

// Fragments of real compiler output, so generated messages hit many rules at once.
fn error_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Parse error on line 3:\n  A[x\n----^".to_string()),
        Just("Expecting 'SQE', 'PE', got 'EOF'".to_string()),
        Just("Welcome to PlantUML".to_string()),
        Just("No @enduml found".to_string()),
        Just("syntax error in line 2 near '->'".to_string()),
        Just("unclosed tag: bpmn:task".to_string()),
        Just("Unexpected token } in JSON at position 7".to_string()),
        Just("bad indentation of a mapping entry (3:5)".to_string()),
        Just("unterminated string".to_string()),
        Just("missing bracket".to_string()),
        Just("found character '\\t' that cannot start any token".to_string()),
        "[ -~]{0,30}",
    ]
}

fn error_text() -> impl Strategy<Value = String> {
    prop::collection::vec(error_fragment(), 0..4).prop_map(|parts| parts.join("\n"))
}

proptest! {
    #[test]
    fn position_round_trip(source in "(\\PC|\n){0,60}", pick in 0usize..100) {
        let len = source.chars().count();
        let offset = if len == 0 { 0 } else { pick % (len + 1) };
        let (line, column) = offset_to_line_column(&source, offset);
        prop_assert!(line >= 1 && column >= 1);
        prop_assert_eq!(line_column_to_offset(&source, line, column), offset);
    }

    #[test]
    fn offsets_past_end_clamp(source in "[a-c\n]{0,20}", extra in 1usize..50) {
        let len = source.chars().count();
        prop_assert_eq!(
            offset_to_line_column(&source, len + extra),
            offset_to_line_column(&source, len)
        );
    }

    #[test]
    fn extractors_are_total(text in "\\PC{0,200}", tag in any_tag()) {
        let _ = extract_specific(&tag, &text);
        let _ = extract_generic(&text);
        let _ = analyze_error(&text, &tag, Some(&text));
    }

    #[test]
    fn garbage_yields_empty_record(text in "[xyzq ]{0,60}") {
        for format in DiagramFormat::ALL {
            prop_assert_eq!(extract_specific(format.tag(), &text), ExtractedInfo::default());
        }
        prop_assert_eq!(extract_generic(&text), ExtractedInfo::default());
    }

    #[test]
    fn classify_is_deterministic(text in error_text(), tag in any_tag()) {
        let info = extract_specific(&tag, &text);
        let first = classify(&text, &tag, &info);
        let prefix = format!("{}-", code_prefix(&tag));
        prop_assert!(first.code.starts_with(&prefix));
        prop_assert!(!first.short_message.is_empty());
        prop_assert_eq!(classify(&text, &tag, &info), first);
    }

    #[test]
    fn suggestion_titles_are_unique(text in error_text(), tag in any_tag(), line in proptest::option::of(1usize..20)) {
        let info = extract_specific(&tag, &text);
        let suggestions = get_fix_suggestions(&text, &tag, line, &info);
        let titles = suggestions.iter().map(|s| s.title.as_str()).collect::<HashSet<_>>();
        prop_assert_eq!(titles.len(), suggestions.len());
    }

    #[test]
    fn record_invariants_hold(text in error_text(), tag in any_tag()) {
        let record = analyze_error(&text, &tag, Some("a\nbb\nccc"));
        if record.line.is_some() {
            prop_assert!(record.column.is_some());
        }
        if record.column.is_some() {
            prop_assert!(record.end_column.is_some());
        }
        prop_assert_eq!(record.message, text);
        prop_assert!(record.code.is_some());
    }

    #[test]
    fn logger_never_exceeds_cap(count in 1usize..40, cap in 1usize..10) {
        let config = UnhandledLogConfig { max_entries: cap, ..Default::default() };
        let log = UnhandledErrorLog::new(Arc::new(MemoryStore::new()), config);
        let record = analyze_error("renderer gave up", "custom", None);
        for i in 0..count {
            log.log(&format!("renderer gave up #{i}"), "custom", &record);
        }
        let entries = log.entries();
        prop_assert_eq!(entries.len(), count.min(cap));
        let last = entries.last().map(|e| e.error_text.clone());
        prop_assert_eq!(last, Some(format!("renderer gave up #{}", count - 1)));
    }
}

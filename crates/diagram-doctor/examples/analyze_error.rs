use diagram_doctor::{analyze_error, apply_fix, explain, to_marker_in};

fn main() {
    let source = "flowchart TD\n    A[Start --> B";
    let error = "Parse error on line 2:\n...TD    A[Start --> B\n---------------------^\nExpecting 'SQE', 'PE', got 'EOF'";

    let record = analyze_error(error, "mermaid", Some(source));
    println!(
        "{} at {:?}:{:?} [{}]",
        record.display_message(),
        record.line,
        record.column,
        record.code.as_deref().unwrap_or("-")
    );

    if let Some(marker) = to_marker_in(&record, source) {
        println!(
            "marker: {}:{}-{}",
            marker.start_line, marker.start_column, marker.end_column
        );
    }

    for suggestion in &record.suggestions {
        let marker = if suggestion.is_preferred { "*" } else { " " };
        println!("{marker} {}", suggestion.title);
    }

    if let Some(fix) = record.preferred_fix() {
        println!("--- fixed ---\n{}", apply_fix(source, fix));
    }

    let help = explain(record.code.as_deref().unwrap_or_default(), &record.message);
    println!("--- help: {} ---\n{}\n{}", help.title, help.description, help.doc_link);
}

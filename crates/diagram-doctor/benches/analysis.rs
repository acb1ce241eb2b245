use criterion::{Criterion, black_box, criterion_group, criterion_main};
use diagram_doctor::{SourceIndex, analyze_error, offset_to_line_column};

const MESSAGES: &[(&str, &str)] = &[
    (
        "mermaid",
        "Parse error on line 2:\n...TD    A[Start --> B[End]\n----------------------^\nExpecting 'SQE', 'DOUBLECIRCLEEND', 'PE', got 'EOF'",
    ),
    ("plantuml", "Welcome to PlantUML"),
    ("graphviz", "Error: <stdin>: syntax error in line 3 near '->'"),
    (
        "bpmn",
        "unparsable content <bpmn:foo> detected\n\tline: 3\n\tcolumn: 4\n\tnested error: unrecognized element <bpmn:foo>",
    ),
    ("vegalite", "Unexpected token } in JSON at position 42"),
    ("wireviz", "bad indentation of a mapping entry (3:5)"),
    ("custom", "something went wrong"),
];

fn large_source(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 32);
    for i in 0..line_count {
        out.push_str(&format!("    N{i}[Node {i}] --> N{}\n", i + 1));
    }
    out.pop();
    out
}

fn bench_analyze(c: &mut Criterion) {
    let source = large_source(200);
    c.bench_function("analyze_error/mixed_formats", |b| {
        b.iter(|| {
            for (format, message) in MESSAGES {
                black_box(analyze_error(black_box(message), format, Some(&source)));
            }
        })
    });
}

fn bench_positions(c: &mut Criterion) {
    let source = large_source(50_000);
    let index = SourceIndex::from_text(&source);
    let len = index.char_count();
    c.bench_function("position/indexed_1000_lookups", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(index.offset_to_position(i * 997 % len));
            }
        })
    });
    c.bench_function("position/one_shot_offset_to_line_column", |b| {
        b.iter(|| black_box(offset_to_line_column(black_box(&source), len / 2)))
    });
}

criterion_group!(benches, bench_analyze, bench_positions);
criterion_main!(benches);

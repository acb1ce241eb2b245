//! Help text for category codes.

use crate::classify::ErrorCategory;
use crate::text::regex;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// User-facing explanation of an error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationEntry {
    /// Headline.
    pub title: &'static str,
    /// What went wrong and how to fix it.
    pub description: &'static str,
    /// A short correct snippet.
    pub example: &'static str,
    /// Reference documentation.
    pub doc_link: &'static str,
}

const fn entry(
    title: &'static str,
    description: &'static str,
    example: &'static str,
    doc_link: &'static str,
) -> ExplanationEntry {
    ExplanationEntry {
        title,
        description,
        example,
        doc_link,
    }
}

const MERMAID_DOCS: &str = "https://mermaid.js.org/intro/syntax-reference.html";
const PLANTUML_DOCS: &str = "https://plantuml.com/guide";
const GRAPHVIZ_DOCS: &str = "https://graphviz.org/doc/info/lang.html";
const D2_DOCS: &str = "https://d2lang.com/tour/intro";
const BPMN_DOCS: &str = "https://www.omg.org/spec/BPMN/2.0";
const VEGALITE_DOCS: &str = "https://vega.github.io/vega-lite/docs/";
const JSON_DOCS: &str = "https://www.json.org/json-en.html";
const YAML_DOCS: &str = "https://yaml.org/spec/1.2.2/";
const XML_DOCS: &str = "https://www.w3.org/TR/xml/";

/// Format-specific entries, keyed by full code.
static BY_CODE: &[(&str, ExplanationEntry)] = &[
    (
        "mermaid-missing-bracket",
        entry(
            "Unclosed node shape",
            "A node label was opened with '[' but never closed. Every shape bracket needs its closer on the same line.",
            "flowchart TD\n    A[Start] --> B[End]",
            "https://mermaid.js.org/syntax/flowchart.html#node-shapes",
        ),
    ),
    (
        "mermaid-missing-paren",
        entry(
            "Unclosed round node",
            "A rounded node '(' or stadium '([' shape was not closed.",
            "flowchart TD\n    A(Rounded) --> B([Stadium])",
            "https://mermaid.js.org/syntax/flowchart.html#node-shapes",
        ),
    ),
    (
        "mermaid-missing-brace",
        entry(
            "Unclosed decision node",
            "A rhombus '{' decision node was not closed with '}'.",
            "flowchart TD\n    A{Ok?} -->|yes| B",
            "https://mermaid.js.org/syntax/flowchart.html#node-shapes",
        ),
    ),
    (
        "mermaid-no-diagram-type",
        entry(
            "Missing diagram type",
            "Mermaid reads the first keyword to decide what to draw. Start with 'flowchart', 'sequenceDiagram', 'classDiagram' or another diagram keyword.",
            "flowchart LR\n    A --> B",
            MERMAID_DOCS,
        ),
    ),
    (
        "mermaid-invalid-arrow",
        entry(
            "Invalid link",
            "The link operator is not one Mermaid knows. Solid links are '-->', dotted links '-.->' and thick links '==>'.",
            "flowchart LR\n    A --> B\n    B -.-> C\n    C ==> D",
            "https://mermaid.js.org/syntax/flowchart.html#links-between-nodes",
        ),
    ),
    (
        "mermaid-missing-end",
        entry(
            "Unclosed block",
            "A 'subgraph', 'loop', 'alt' or 'opt' block was opened but the diagram ended before its 'end'.",
            "flowchart TD\n    subgraph one\n        A --> B\n    end",
            MERMAID_DOCS,
        ),
    ),
    (
        "plantuml-missing-start",
        entry(
            "Missing @startuml",
            "PlantUML only renders text between @startuml and @enduml. Without the start marker it shows its welcome page instead.",
            "@startuml\nAlice -> Bob: hello\n@enduml",
            PLANTUML_DOCS,
        ),
    ),
    (
        "plantuml-missing-end",
        entry(
            "Missing @enduml",
            "The diagram was opened with @startuml but never closed.",
            "@startuml\nAlice -> Bob: hello\n@enduml",
            PLANTUML_DOCS,
        ),
    ),
    (
        "c4plantuml-missing-start",
        entry(
            "Missing @startuml",
            "C4-PlantUML diagrams are PlantUML diagrams and need the @startuml marker before the !include line.",
            "@startuml\n!include <C4/C4_Context>\nPerson(user, \"User\")\n@enduml",
            "https://github.com/plantuml-stdlib/C4-PlantUML",
        ),
    ),
    (
        "graphviz-syntax-error",
        entry(
            "DOT syntax error",
            "Graphviz could not parse a statement. The reported line is where the parser gave up; the mistake is often just before it.",
            "digraph G {\n    a -> b;\n}",
            GRAPHVIZ_DOCS,
        ),
    ),
    (
        "graphviz-invalid-arrow",
        entry(
            "Wrong edge operator",
            "Directed graphs ('digraph') use '->' and undirected graphs ('graph') use '--'.",
            "digraph G { a -> b }\ngraph H { a -- b }",
            GRAPHVIZ_DOCS,
        ),
    ),
    (
        "d2-syntax-error",
        entry(
            "D2 syntax error",
            "D2 could not parse a key or edge. Keys take a label after ':' and open a map with '{'.",
            "server: Web Server {\n  shape: rectangle\n}\nserver -> db",
            D2_DOCS,
        ),
    ),
    (
        "bpmn-unclosed-tag",
        entry(
            "Unclosed BPMN element",
            "A BPMN element was opened but never closed. Every start tag needs a matching end tag, or must be self-closing.",
            "<bpmn:task id=\"Task_1\" />",
            BPMN_DOCS,
        ),
    ),
    (
        "vegalite-invalid-json",
        entry(
            "Invalid Vega-Lite JSON",
            "The diagram source is not valid JSON. Check for trailing commas, single quotes and unbalanced braces.",
            "{\n  \"mark\": \"bar\",\n  \"encoding\": {}\n}",
            VEGALITE_DOCS,
        ),
    ),
    (
        "wireviz-invalid-yaml",
        entry(
            "Invalid WireViz YAML",
            "The harness description is not valid YAML. Indent with spaces and keep sibling keys aligned.",
            "connectors:\n  X1:\n    pincount: 4",
            "https://github.com/wireviz/WireViz/blob/master/docs/syntax.md",
        ),
    ),
];

/// Category-wide entries, keyed by category slug.
static BY_CATEGORY: &[(&str, ExplanationEntry)] = &[
    (
        "missing-bracket",
        entry(
            "Missing closing bracket",
            "A '[' was opened but not closed.",
            "[label]",
            MERMAID_DOCS,
        ),
    ),
    (
        "missing-paren",
        entry(
            "Missing closing parenthesis",
            "A '(' was opened but not closed.",
            "(label)",
            MERMAID_DOCS,
        ),
    ),
    (
        "missing-brace",
        entry(
            "Missing closing brace",
            "A '{' was opened but not closed.",
            "group {\n  a\n}",
            GRAPHVIZ_DOCS,
        ),
    ),
    (
        "missing-start",
        entry(
            "Missing start declaration",
            "This format requires a start marker before any content.",
            "@startuml\n...\n@enduml",
            PLANTUML_DOCS,
        ),
    ),
    (
        "missing-end",
        entry(
            "Missing end declaration",
            "A block or the whole diagram was opened but never closed.",
            "@startuml\n...\n@enduml",
            PLANTUML_DOCS,
        ),
    ),
    (
        "no-diagram-type",
        entry(
            "Unknown diagram type",
            "The renderer could not tell what kind of diagram this is from its first line.",
            "flowchart TD\n    A --> B",
            MERMAID_DOCS,
        ),
    ),
    (
        "unclosed-tag",
        entry(
            "Unclosed XML tag",
            "An element was opened but never closed.",
            "<element>...</element>",
            XML_DOCS,
        ),
    ),
    (
        "malformed-xml",
        entry(
            "Malformed XML",
            "The document is not well-formed XML: check tag nesting, quoting of attributes and stray characters before the root element.",
            "<?xml version=\"1.0\"?>\n<root attr=\"value\"/>",
            XML_DOCS,
        ),
    ),
    (
        "invalid-json",
        entry(
            "Invalid JSON",
            "The document is not valid JSON. Strings and keys need double quotes and trailing commas are not allowed.",
            "{ \"key\": [1, 2, 3] }",
            JSON_DOCS,
        ),
    ),
    (
        "invalid-yaml",
        entry(
            "Invalid YAML",
            "The document is not valid YAML. Indent with spaces and keep sibling keys aligned.",
            "key:\n  child: value",
            YAML_DOCS,
        ),
    ),
    (
        "invalid-arrow",
        entry(
            "Invalid arrow",
            "The arrow or link operator is not valid for this diagram type.",
            "A --> B",
            MERMAID_DOCS,
        ),
    ),
    (
        "unexpected-token",
        entry(
            "Unexpected token",
            "The parser met a token it did not expect here. Look for typos, unquoted special characters or a missing separator just before it.",
            "A[\"label (with parens)\"]",
            MERMAID_DOCS,
        ),
    ),
    (
        "syntax-error",
        entry(
            "Syntax error",
            "The renderer could not parse the diagram at the reported position.",
            "",
            MERMAID_DOCS,
        ),
    ),
];

static DEFAULT_ENTRY: ExplanationEntry = entry(
    "Diagram error",
    "The renderer rejected the diagram. Check the line it reported and the syntax reference for this format.",
    "",
    "https://kroki.io/#support",
);

// Coarse message patterns, checked against the lowercased message.
static BY_MESSAGE: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bbrackets?\b|\bsqe\b", "missing-bracket"),
        (r"\bparen(?:s|thesis|theses)?\b|\bpe\b", "missing-paren"),
        (r"\bbraces?\b|\bdiamond_stop\b", "missing-brace"),
        (r"@startuml|welcome to plantuml", "missing-start"),
        (r"@enduml|'end'", "missing-end"),
        (r"\bdiagram type\b", "no-diagram-type"),
        (r"\bunclosed\b|\bend-tag\b", "unclosed-tag"),
        (r"\bxml\b|\btags?\b", "malformed-xml"),
        (r"\bjson\b", "invalid-json"),
        (r"\byaml\b|\bindentation\b|\bmapping\b", "invalid-yaml"),
        (r"\barrows?\b|\blinks?\b|\bedges?\b", "invalid-arrow"),
        (r"\bunexpected\b|\bunrecognized\b|\blexical\b", "unexpected-token"),
        (r"\bsyntax\b|\bpars(?:e|er|ing)\b", "syntax-error"),
    ]
    .into_iter()
    .map(|(pattern, slug)| (regex(pattern), slug))
    .collect()
});

fn find(table: &'static [(&str, ExplanationEntry)], key: &str) -> Option<&'static ExplanationEntry> {
    table.iter().find(|(k, _)| *k == key).map(|(_, e)| e)
}

/// Look up help text for a category code, falling back to the message when the code is unknown.
///
/// Never fails: an unknown code and an unrecognizable message yield a generic entry.
pub fn explain(code: &str, message: &str) -> &'static ExplanationEntry {
    let code = code.trim().to_ascii_lowercase();
    if let Some(entry) = find(BY_CODE, &code) {
        return entry;
    }
    if let Some(entry) = ErrorCategory::from_code(&code).and_then(|c| find(BY_CATEGORY, c.slug())) {
        return entry;
    }

    let lowered = message.to_lowercase();
    BY_MESSAGE
        .iter()
        .find(|(pattern, _)| pattern.is_match(&lowered))
        .and_then(|(_, slug)| find(BY_CATEGORY, slug))
        .unwrap_or(&DEFAULT_ENTRY)
}

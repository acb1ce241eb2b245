//! Fix-suggestion engine and edit application.
//!
//! Suggestions come from three tiers, concatenated in order and de-duplicated by title:
//!
//! 1. token fixes, derived from the `expected` token alone;
//! 2. per-family pattern rules, each a `(regex, builder)` pair tried in order;
//! 3. generic fixes, consulted only when the first two tiers produced nothing.
//!
//! Builders never need the document's line count: content that does not exist yet is appended
//! through the [`crate::record::END_OF_DOCUMENT_LINE`] sentinel, which [`apply_fix`] turns into
//! a real append.

use crate::extract::ExtractedInfo;
use crate::position::SourceIndex;
use crate::record::{FixSuggestion, REST_OF_LINE_COLUMN, TextEdit};
use crate::text::regex;
use crate::tokens::delimiter_for_token;
use diagram_doctor_lang::{DiagramFormat, FormatFamily, family_for_tag};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// What a fix builder gets to see besides its own match.
pub struct FixContext<'a> {
    /// Format tag as supplied by the caller.
    pub diagram_type: &'a str,
    /// Best known line of the error.
    pub line: Option<usize>,
    /// Merged extraction result.
    pub info: &'a ExtractedInfo,
}

type FixBuilder = fn(&Captures<'_>, &FixContext<'_>) -> Vec<FixSuggestion>;

struct FixRule {
    pattern: Regex,
    build: FixBuilder,
}

impl FixRule {
    fn new(pattern: &str, build: FixBuilder) -> Self {
        Self {
            pattern: regex(pattern),
            build,
        }
    }
}

/// Collect fix suggestions for an error.
///
/// `line` overrides the extracted line when the caller knows better (for example after
/// converting an offset).
pub fn get_fix_suggestions(
    error_text: &str,
    diagram_type: &str,
    line: Option<usize>,
    info: &ExtractedInfo,
) -> Vec<FixSuggestion> {
    let ctx = FixContext {
        diagram_type,
        line: line.or(info.line),
        info,
    };

    let mut suggestions = token_fixes(&ctx);
    if let Some(family) = family_for_tag(diagram_type) {
        suggestions.extend(pattern_fixes(error_text, family_rules(family), &ctx));
    }
    if suggestions.is_empty() {
        suggestions = pattern_fixes(error_text, &GENERIC_RULES, &ctx);
    }

    let suggestions = dedup_by_title(suggestions);
    debug!(
        diagram_type,
        count = suggestions.len(),
        "collected fix suggestions"
    );
    suggestions
}

fn token_fixes(ctx: &FixContext<'_>) -> Vec<FixSuggestion> {
    let Some(delimiter) = ctx.info.expected.as_deref().and_then(delimiter_for_token) else {
        return Vec::new();
    };

    // Without a line the parser ran off the end of the input; the closer belongs there.
    let edit = match ctx.line {
        Some(line) => TextEdit::insert(
            line,
            ctx.info.column.unwrap_or(REST_OF_LINE_COLUMN),
            delimiter.as_str(),
        ),
        None => TextEdit::append(delimiter.as_str()),
    };
    vec![
        FixSuggestion::with_edit(format!("Insert '{}'", delimiter.as_str()), edit)
            .describe(format!("Add the missing {}", delimiter.name()))
            .preferred(),
    ]
}

fn pattern_fixes(error_text: &str, rules: &[FixRule], ctx: &FixContext<'_>) -> Vec<FixSuggestion> {
    rules
        .iter()
        .filter_map(|rule| rule.pattern.captures(error_text).map(|caps| (rule.build)(&caps, ctx)))
        .flatten()
        .collect()
}

fn dedup_by_title(suggestions: Vec<FixSuggestion>) -> Vec<FixSuggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.title.clone()))
        .collect()
}

fn family_rules(family: FormatFamily) -> &'static [FixRule] {
    match family {
        FormatFamily::FlowSequence => &FLOW_RULES,
        FormatFamily::UmlLike => &UML_RULES,
        FormatFamily::GraphDescription => &GRAPH_RULES,
        FormatFamily::Xml => &XML_RULES,
        FormatFamily::Json => &JSON_RULES,
        FormatFamily::Yaml => &YAML_RULES,
        FormatFamily::AsciiArt => &ASCII_RULES,
    }
}

static FLOW_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)no diagram type detected|unknown diagram type",
            |_, ctx| header_fixes(ctx),
        ),
        FixRule::new(
            r"(?i)got '(?:link|arrow\w*)'|invalid (?:arrow|link)|near '-[->]'",
            |_, _| {
                vec![
                    FixSuggestion::advisory("Use '-->' for a solid arrow", "A --> B"),
                    FixSuggestion::advisory("Use '-.->' for a dotted arrow", "A -.-> B"),
                    FixSuggestion::advisory("Use '==>' for a thick arrow", "A ==> B"),
                ]
            },
        ),
        FixRule::new(
            r"(?i)expecting [^\n]*'end'[^\n]*got 'eof'|unclosed subgraph|missing 'end'",
            |_, _| {
                vec![
                    FixSuggestion::with_edit("Close the block with 'end'", TextEdit::append("\nend"))
                        .describe("Every 'subgraph', 'loop', 'alt' or 'opt' block needs an 'end'")
                        .preferred(),
                ]
            },
        ),
        FixRule::new(r"(?i)lexical error", |_, _| {
            vec![FixSuggestion::advisory(
                "Quote labels with special characters",
                "Wrap node text in double quotes, e.g. A[\"label (x)\"]",
            )]
        }),
    ]
});

/// Insert the format's default header; brace-delimited headers also get a closing fix.
fn header_fixes(ctx: &FixContext<'_>) -> Vec<FixSuggestion> {
    let Some(keyword) = DiagramFormat::from_tag(ctx.diagram_type)
        .and_then(|format| format.header_keywords().first().copied())
    else {
        return Vec::new();
    };
    let mut fixes = vec![
        FixSuggestion::with_edit(
            "Add diagram type declaration",
            TextEdit::insert(1, 1, format!("{keyword}\n")),
        )
        .describe(format!("Start the diagram with '{keyword}'"))
        .preferred(),
    ];
    if keyword.ends_with('{') {
        fixes.push(
            FixSuggestion::with_edit("Close the diagram block", TextEdit::append("\n}"))
                .describe(format!("Close the block opened by '{keyword}'")),
        );
    }
    fixes
}

fn uml_markers(ctx: &FixContext<'_>) -> (Option<&'static str>, Option<&'static str>) {
    let markers = DiagramFormat::from_tag(ctx.diagram_type)
        .map(DiagramFormat::markers)
        .unwrap_or_default();
    (markers.start, markers.end)
}

static UML_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)welcome to plantuml|no @startuml|missing @startuml",
            |_, ctx| {
                let (start, _) = uml_markers(ctx);
                let start = start.unwrap_or("@startuml");
                vec![
                    FixSuggestion::with_edit(
                        format!("Add {start}"),
                        TextEdit::insert(1, 1, format!("{start}\n")),
                    )
                    .describe(format!("The diagram must begin with {start}"))
                    .preferred(),
                ]
            },
        ),
        FixRule::new(r"(?i)no @enduml|missing @enduml", |_, ctx| {
            let (_, end) = uml_markers(ctx);
            let end = end.unwrap_or("@enduml");
            vec![
                FixSuggestion::with_edit(format!("Add {end}"), TextEdit::append(format!("\n{end}")))
                    .describe(format!("The diagram must end with {end}"))
                    .preferred(),
            ]
        }),
        FixRule::new(r"(?i)syntax error", |_, _| {
            vec![FixSuggestion::advisory(
                "Check arrow and keyword syntax",
                "PlantUML arrows look like '->', '-->' or '..>'; keywords are case-sensitive",
            )]
        }),
    ]
});

static GRAPH_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)no diagram type detected|unknown diagram type|expect(?:ed|ing) '?(?:di)?graph'?",
            |_, ctx| header_fixes(ctx),
        ),
        FixRule::new(r"(?i)syntax error in line \d+ near '-[->]?'", |_, _| {
            vec![FixSuggestion::advisory(
                "Match the edge operator to the graph kind",
                "Use '->' inside 'digraph' and '--' inside 'graph'",
            )]
        }),
        FixRule::new(r"(?i)syntax error in line \d+ near '([^']+)'", |caps, _| {
            let near = caps.get(1).map_or("", |m| m.as_str());
            vec![FixSuggestion::advisory(
                "Check the statement before the error",
                format!("Look for a missing ';', quote or bracket just before '{near}'"),
            )]
        }),
        FixRule::new(
            r"(?i)unexpected text after map key|unexpected map termination",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Check D2 key syntax",
                    "A key is followed by ':' and a label, or by '{' to open a map",
                )]
            },
        ),
        FixRule::new(r"(?i)got unexpected token", |_, _| {
            vec![FixSuggestion::advisory(
                "Check edge and attribute syntax",
                "Edges use '->' and attributes go in square brackets, e.g. A -> B [label = \"x\"]",
            )]
        }),
    ]
});

static XML_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)unclosed (?:root )?(?:tag|element)|must be terminated by the matching end-tag",
            |_, ctx| match ctx.info.near.as_deref() {
                Some(tag) => vec![
                    FixSuggestion::with_edit(
                        format!("Close <{tag}>"),
                        TextEdit::append(format!("\n</{tag}>")),
                    )
                    .describe(format!("Add the missing </{tag}> end tag"))
                    .preferred(),
                ],
                None => vec![FixSuggestion::advisory(
                    "Close the open element",
                    "Every start tag needs a matching end tag",
                )],
            },
        ),
        FixRule::new(r"(?i)unexpected close tag|mismatched tag", |_, _| {
            vec![FixSuggestion::advisory(
                "Remove the stray end tag",
                "An end tag does not match the element that is open at this point",
            )]
        }),
        FixRule::new(
            r"(?i)content is not allowed in prolog|non-whitespace before first tag",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Remove text before the root element",
                    "Nothing but the XML declaration and comments may precede the root element",
                )]
            },
        ),
        FixRule::new(
            r"(?i)unparsable content|unknown element|unrecognized element",
            |_, ctx| {
                let description = match ctx.info.near.as_deref() {
                    Some(name) => format!("'{name}' is not a known element; check its spelling and namespace"),
                    None => "Check element names and namespace prefixes".to_string(),
                };
                vec![FixSuggestion::advisory("Check the element name", description)]
            },
        ),
        FixRule::new(r"(?i)attribute \S+ redefined|duplicate attribute", |_, _| {
            vec![FixSuggestion::advisory(
                "Remove the duplicate attribute",
                "An attribute may appear only once per element",
            )]
        }),
    ]
});

static JSON_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)unexpected end of (?:json )?input|unexpected end of data|eof while parsing",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Close all open braces and brackets",
                    "The document ends before every '{' and '[' is closed",
                )]
            },
        ),
        FixRule::new(
            r#"(?i)unexpected token\s*'?[}\]]|trailing comma"#,
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Remove the trailing comma",
                    "JSON does not allow a comma before '}' or ']'",
                )]
            },
        ),
        FixRule::new(
            r"(?i)unexpected token\s*'?'|expected (?:double-quoted )?property name|property name must be a string",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Use double quotes",
                    "Property names and strings must use double quotes",
                )]
            },
        ),
        FixRule::new(r"(?i)bad control character|unterminated string", |_, _| {
            vec![FixSuggestion::advisory(
                "Escape special characters in strings",
                "Newlines and tabs inside strings must be written as \\n and \\t",
            )]
        }),
    ]
});

static YAML_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(r"(?i)found character '\\t'|\btab", |_, _| {
            vec![FixSuggestion::advisory(
                "Replace tabs with spaces",
                "YAML indentation must use spaces",
            )]
        }),
        FixRule::new(
            r"(?i)bad indentation|mapping values are not allowed|could not find expected ':'",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Fix the indentation",
                    "Keys of the same mapping must start in the same column",
                )]
            },
        ),
        FixRule::new(r"(?i)duplicated mapping key|duplicate key", |_, _| {
            vec![FixSuggestion::advisory(
                "Remove the duplicate key",
                "Each key may appear only once in a mapping",
            )]
        }),
    ]
});

static ASCII_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(r"(?i)\btab", |_, _| {
            vec![FixSuggestion::advisory(
                "Replace tabs with spaces",
                "Tabs break column alignment in ASCII diagrams",
            )]
        }),
        FixRule::new(
            r"(?i)unrecognized character|invalid character|non-ascii",
            |_, _| {
                vec![FixSuggestion::advisory(
                    "Use plain ASCII drawing characters",
                    "Draw with '-', '|', '+', '/', '\\' and letters",
                )]
            },
        ),
    ]
});

static GENERIC_RULES: LazyLock<Vec<FixRule>> = LazyLock::new(|| {
    vec![
        FixRule::new(
            r"(?i)unterminated string|unclosed string|unterminated quote|missing closing quote",
            |_, ctx| match ctx.line {
                Some(line) => vec![
                    FixSuggestion::with_edit(
                        "Close the string",
                        TextEdit::insert(line, REST_OF_LINE_COLUMN, "\""),
                    )
                    .describe("Add the missing closing quote at the end of the line")
                    .preferred(),
                ],
                None => vec![FixSuggestion::advisory(
                    "Close the string",
                    "A string literal is missing its closing quote",
                )],
            },
        ),
        FixRule::new(r"(?i)bracket|brace|paren", |_, _| {
            vec![FixSuggestion::advisory(
                "Check bracket pairs",
                "Every opening bracket, brace or parenthesis needs a matching closer",
            )]
        }),
    ]
});

/// Apply a suggestion's edit to `code`. Advisory suggestions return the code unchanged.
pub fn apply_fix(code: &str, fix: &FixSuggestion) -> String {
    match &fix.edit {
        Some(edit) => apply_text_edits(code, std::slice::from_ref(edit)),
        None => code.to_string(),
    }
}

fn resolve_edit(index: &SourceIndex, edit: &TextEdit) -> (usize, usize) {
    let end_of_document = index.char_count();
    if edit.start_line > index.line_count() {
        return (end_of_document, end_of_document);
    }
    let start = index.position_to_offset(edit.start_line, edit.start_column);
    let end = index.position_to_offset(edit.end_line, edit.end_column);
    (start.min(end), start.max(end))
}

/// Apply several edits, all expressed against the original `code`.
///
/// Edits whose start line lies past the document (including
/// [`crate::record::END_OF_DOCUMENT_LINE`]) append
/// their text to the end. Edits are applied from the last start offset to the first so earlier
/// ones do not shift later ones; edits at the same offset keep their listed order.
pub fn apply_text_edits(code: &str, edits: &[TextEdit]) -> String {
    let mut index = SourceIndex::from_text(code);

    let mut resolved = edits
        .iter()
        .enumerate()
        .map(|(order, edit)| {
            let (start, end) = resolve_edit(&index, edit);
            (order, start, end, edit.text.as_str())
        })
        .collect::<Vec<_>>();

    resolved.sort_by_key(|(order, start, _, _)| std::cmp::Reverse((*start, *order)));

    for (_, start, end, text) in resolved {
        index.replace(start, end, text);
    }
    index.text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;

    fn suggestions_for(diagram_type: &str, text: &str) -> Vec<FixSuggestion> {
        let info = extract(diagram_type, text, None);
        get_fix_suggestions(text, diagram_type, None, &info)
    }

    #[test]
    fn test_token_fix_for_grammar_name() {
        let text = "Parse error on line 1:\nA[Start\n-------^\nExpecting 'SQE', 'PE', got 'EOF'";
        let suggestions = suggestions_for("mermaid", text);
        let first = &suggestions[0];
        assert_eq!(first.title, "Insert ']'");
        assert!(first.is_preferred);
        assert_eq!(first.edit, Some(TextEdit::insert(1, 8, "]")));
    }

    #[test]
    fn test_token_fix_without_position_appends() {
        let suggestions = suggestions_for("mermaid", "Expecting 'SQE', 'PE', got 'EOF'");
        assert_eq!(suggestions[0].edit, Some(TextEdit::append("]")));
        assert_eq!(apply_fix("A[Start", &suggestions[0]), "A[Start]");
    }

    #[test]
    fn test_token_fix_with_line_only_targets_end_of_line() {
        let info = ExtractedInfo {
            line: Some(2),
            expected: Some("RPAREN".to_string()),
            ..Default::default()
        };
        let suggestions = get_fix_suggestions("", "custom", None, &info);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(apply_fix("a\nf(x\nb", &suggestions[0]), "a\nf(x)\nb");
    }

    #[test]
    fn test_plantuml_start_fix() {
        let suggestions = suggestions_for("plantuml", "Welcome to PlantUML");
        let first = &suggestions[0];
        assert!(first.is_preferred);
        assert_eq!(first.edit, Some(TextEdit::insert(1, 1, "@startuml\n")));
        assert_eq!(apply_fix("A -> B\n@enduml", first), "@startuml\nA -> B\n@enduml");
    }

    #[test]
    fn test_mermaid_header_fix() {
        let suggestions = suggestions_for("mermaid", "No diagram type detected for text: A --> B");
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].edit, Some(TextEdit::insert(1, 1, "flowchart TD\n")));
        assert_eq!(apply_fix("A --> B", &suggestions[0]), "flowchart TD\nA --> B");
    }

    #[test]
    fn test_graphviz_header_fix_closes_block() {
        let suggestions = suggestions_for("dot", "Error: expecting 'digraph' at start of input");
        let titles = suggestions.iter().map(|s| s.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Add diagram type declaration", "Close the diagram block"]);
        assert!(suggestions[0].is_preferred);
        let code = apply_fix("a -> b", &suggestions[0]);
        assert_eq!(apply_fix(&code, &suggestions[1]), "digraph G {\na -> b\n}");
    }

    #[test]
    fn test_header_fix_needs_known_keywords() {
        let suggestions = suggestions_for("d2", "unknown diagram type");
        assert!(suggestions.iter().all(|s| s.title != "Add diagram type declaration"));
    }

    #[test]
    fn test_structurizr_start_marker() {
        let suggestions = suggestions_for("structurizr", "missing @startuml");
        assert_eq!(suggestions[0].title, "Add workspace {");
    }

    #[test]
    fn test_xml_close_tag_appends() {
        let suggestions = suggestions_for("bpmn", "unclosed tag: bpmn:task");
        let first = &suggestions[0];
        assert_eq!(first.title, "Close <bpmn:task>");
        assert!(first.edit.as_ref().is_some_and(TextEdit::is_append));
        assert_eq!(apply_fix("<bpmn:task>", first), "<bpmn:task>\n</bpmn:task>");
    }

    #[test]
    fn test_mermaid_arrow_advisories() {
        let suggestions = suggestions_for("mermaid", "Parse error on line 3: ... got 'LINK'");
        let titles = suggestions.iter().map(|s| s.title.as_str()).collect::<Vec<_>>();
        assert_eq!(
            titles,
            vec![
                "Use '-->' for a solid arrow",
                "Use '-.->' for a dotted arrow",
                "Use '==>' for a thick arrow",
            ]
        );
        assert!(suggestions.iter().all(|s| !s.is_applicable()));
    }

    #[test]
    fn test_generic_tier_only_when_nothing_else() {
        let info = ExtractedInfo {
            line: Some(1),
            ..Default::default()
        };
        let suggestions = get_fix_suggestions("unterminated string", "custom", None, &info);
        assert_eq!(suggestions[0].title, "Close the string");
        assert_eq!(apply_fix("label \"abc", &suggestions[0]), "label \"abc\"");

        // A family rule matched, so no generic fixes are added.
        let suggestions = suggestions_for("wireviz", "bad indentation of a mapping entry (3:5), unterminated string");
        assert!(suggestions.iter().all(|s| s.title != "Close the string"));
    }

    #[test]
    fn test_dedup_by_title() {
        let suggestions = dedup_by_title(vec![
            FixSuggestion::advisory("Replace tabs with spaces", "first"),
            FixSuggestion::advisory("Fix the indentation", "second"),
            FixSuggestion::advisory("Replace tabs with spaces", "third"),
        ]);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].description.as_deref(), Some("first"));
    }

    #[test]
    fn test_no_fix_available() {
        assert!(suggestions_for("graphviz", "renderer crashed").is_empty());
    }

    #[test]
    fn test_apply_advisory_is_identity() {
        let fix = FixSuggestion::advisory("Look", "at it");
        assert_eq!(apply_fix("abc", &fix), "abc");
    }

    #[test]
    fn test_apply_clamps_columns() {
        let fix = FixSuggestion::with_edit("x", TextEdit::insert(1, 99, "!"));
        assert_eq!(apply_fix("ab\ncd", &fix), "ab!\ncd");
        let fix = FixSuggestion::with_edit("x", TextEdit::insert(1, 0, "!"));
        assert_eq!(apply_fix("ab", &fix), "!ab");
    }

    #[test]
    fn test_apply_past_last_line_appends() {
        let fix = FixSuggestion::with_edit("x", TextEdit::insert(7, 1, "\nend"));
        assert_eq!(apply_fix("a\nb", &fix), "a\nb\nend");
        let fix = FixSuggestion::with_edit("x", TextEdit::append("\nend"));
        assert_eq!(apply_fix("", &fix), "\nend");
    }

    #[test]
    fn test_apply_replacement() {
        let edit = TextEdit {
            start_line: 1,
            start_column: 3,
            end_line: 1,
            end_column: 6,
            text: "-->".to_string(),
        };
        assert_eq!(apply_text_edits("A ->> B", &[edit]), "A --> B");
    }

    #[test]
    fn test_apply_multiple_edits() {
        let edits = [
            TextEdit::insert(1, 1, "@startuml\n"),
            TextEdit::insert(2, 3, "]"),
            TextEdit::append("\n@enduml"),
        ];
        assert_eq!(
            apply_text_edits("A\nB[", &edits),
            "@startuml\nA\nB[]\n@enduml"
        );
    }

    #[test]
    fn test_same_offset_keeps_order() {
        let edits = [TextEdit::insert(1, 1, "a"), TextEdit::insert(1, 1, "b")];
        assert_eq!(apply_text_edits("c", &edits), "abc");
    }
}

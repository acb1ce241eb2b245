use regex::{Captures, Regex};

/// Compile a pattern that is a literal in this crate.
pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid built-in regex")
}

/// Parse capture group `index` as a number.
pub(crate) fn capture_number(caps: &Captures<'_>, index: usize) -> Option<usize> {
    caps.get(index)?.as_str().trim().parse().ok()
}

/// Owned text of capture group `index`, if it matched.
pub(crate) fn capture_text(caps: &Captures<'_>, index: usize) -> Option<String> {
    caps.get(index).map(|m| m.as_str().to_string())
}

/// First non-blank line of a message, trimmed.
pub(crate) fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Truncate to at most `max` characters.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Whether `value` looks like a raw grammar token name (`EOF`, `NEWLINE`, `SQE`) rather than
/// source text.
pub(crate) fn is_grammar_token_name(value: &str) -> bool {
    value.len() >= 2
        && value.starts_with(|c: char| c.is_ascii_uppercase())
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

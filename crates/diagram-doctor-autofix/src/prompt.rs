//! Repair prompt construction and model-response cleanup.

use crate::controller::ValidationFailure;
use diagram_doctor::SourceIndex;

/// Builds the prompt sent to the repair model.
///
/// The prompt always carries the diagram format, the current code and the error (classified
/// summary when there is one, raw text otherwise). The error location with the offending line
/// and the preferred fix's description are added when known.
#[derive(Debug, Clone)]
pub struct RepairPromptBuilder<'a> {
    diagram_type: &'a str,
    code: &'a str,
    failure: &'a ValidationFailure,
    include_fix_hint: bool,
}

impl<'a> RepairPromptBuilder<'a> {
    /// Start a prompt for `code` failing with `failure`.
    pub fn new(diagram_type: &'a str, code: &'a str, failure: &'a ValidationFailure) -> Self {
        Self {
            diagram_type,
            code,
            failure,
            include_fix_hint: true,
        }
    }

    /// Whether to include the preferred fix as a hint.
    pub fn with_fix_hint(mut self, include: bool) -> Self {
        self.include_fix_hint = include;
        self
    }

    /// The one-line description of the error.
    pub fn error_summary(&self) -> &str {
        match &self.failure.record {
            Some(record) => record.display_message(),
            None => self.failure.error.trim(),
        }
    }

    /// The preferred fix's description (or title), if hints are enabled and one exists.
    pub fn fix_hint(&self) -> Option<&str> {
        if !self.include_fix_hint {
            return None;
        }
        let fix = self.failure.record.as_ref()?.preferred_fix()?;
        Some(fix.description.as_deref().unwrap_or(&fix.title))
    }

    fn location(&self) -> Option<String> {
        let record = self.failure.record.as_ref()?;
        let line = record.line?;
        let column = record.column.unwrap_or(1);

        let mut out = format!("Location: line {line}, column {column}\n");
        if let Some(text) = SourceIndex::from_text(self.code).line_text(line) {
            let gutter = format!("  → {line:4} │ ");
            let caret_column = column.clamp(1, text.chars().count() + 1);
            let caret_pad = " ".repeat(gutter.chars().count() + caret_column - 1);
            out.push_str(&format!("{gutter}{text}\n{caret_pad}^\n"));
        }
        Some(out)
    }

    /// Render the prompt.
    pub fn build(&self) -> String {
        let mut prompt = format!(
            "The following {} diagram fails to render.\n\nError: {}\n",
            self.diagram_type,
            self.error_summary()
        );
        if let Some(record) = &self.failure.record
            && record.short_message.as_deref() != Some(record.message.trim())
        {
            prompt.push_str(&format!("Compiler output:\n{}\n", record.message.trim()));
        }
        if let Some(location) = self.location() {
            prompt.push_str(&location);
        }
        if let Some(hint) = self.fix_hint() {
            prompt.push_str(&format!("Suggested fix: {hint}\n"));
        }
        prompt.push_str(&format!(
            "\nReturn only the corrected {} source, without explanations.\n\n```\n{}\n```\n",
            self.diagram_type, self.code
        ));
        prompt
    }
}

/// Pull diagram source out of a model response.
///
/// Uses the body of the first fenced code block when there is one (an unterminated fence runs
/// to the end of the response); otherwise the whole response. Surrounding whitespace is trimmed.
pub fn extract_code_block(response: &str) -> String {
    let Some(fence) = response.find("```") else {
        return response.trim().to_string();
    };
    let after_fence = &response[fence + 3..];
    // Skip the info string (```mermaid).
    let body = after_fence
        .find('\n')
        .map_or(after_fence, |newline| &after_fence[newline + 1..]);
    let body = body.find("```").map_or(body, |end| &body[..end]);
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagram_doctor::analyze_error;

    fn failure(error: &str, diagram_type: &str, code: &str) -> ValidationFailure {
        ValidationFailure {
            error: error.to_string(),
            record: Some(analyze_error(error, diagram_type, Some(code))),
            validator_unavailable: false,
        }
    }

    #[test]
    fn test_prompt_elements() {
        let code = "Alice -> Bob\n@enduml";
        let failure = failure("Welcome to PlantUML", "plantuml", code);
        let prompt = RepairPromptBuilder::new("plantuml", code, &failure).build();
        assert!(prompt.contains("plantuml diagram"));
        assert!(prompt.contains("Error: Missing @startuml declaration"));
        assert!(prompt.contains("Compiler output:\nWelcome to PlantUML"));
        assert!(prompt.contains("Location: line 1, column 1"));
        assert!(prompt.contains("→    1 │ Alice -> Bob"));
        assert!(prompt.contains("Suggested fix: The diagram must begin with @startuml"));
        assert!(prompt.contains("```\nAlice -> Bob\n@enduml\n```"));
    }

    /// Char index of the caret under the excerpt line, and of the excerpt's first char.
    fn caret_alignment(prompt: &str) -> (usize, usize) {
        let lines = prompt.lines().collect::<Vec<_>>();
        let excerpt = lines.iter().position(|l| l.contains('→')).unwrap();
        let text_start = lines[excerpt].chars().position(|c| c == '│').unwrap() + 2;
        let caret = lines[excerpt + 1].chars().position(|c| c == '^').unwrap();
        (caret, text_start)
    }

    #[test]
    fn test_caret_under_error_column() {
        let code = "abc -> def";
        let failure = failure("Parse error at line 1 column 5", "nomnoml", code);
        let prompt = RepairPromptBuilder::new("nomnoml", code, &failure).build();
        let (caret, text_start) = caret_alignment(&prompt);
        assert_eq!(caret, text_start + 4);
        assert_eq!(code.chars().nth(caret - text_start), Some('-'));
    }

    #[test]
    fn test_caret_clamped_to_line_end() {
        let code = "abc -> def";
        let failure = failure("Parse error at line 1 column 18446744073709551615", "nomnoml", code);
        let prompt = RepairPromptBuilder::new("nomnoml", code, &failure).build();
        let (caret, text_start) = caret_alignment(&prompt);
        assert_eq!(caret, text_start + code.chars().count());
    }

    #[test]
    fn test_prompt_without_hint() {
        let code = "Alice -> Bob";
        let failure = failure("Welcome to PlantUML", "plantuml", code);
        let prompt = RepairPromptBuilder::new("plantuml", code, &failure)
            .with_fix_hint(false)
            .build();
        assert!(!prompt.contains("Suggested fix"));
    }

    #[test]
    fn test_prompt_raw_error_without_record() {
        let failure = ValidationFailure {
            error: "connection refused\n".to_string(),
            record: None,
            validator_unavailable: true,
        };
        let prompt = RepairPromptBuilder::new("d2", "a -> b", &failure).build();
        assert!(prompt.contains("Error: connection refused\n"));
        assert!(!prompt.contains("Location"));
        assert!(!prompt.contains("Suggested fix"));
    }

    #[test]
    fn test_extract_code_block() {
        assert_eq!(extract_code_block("  graph TD\n A-->B \n"), "graph TD\n A-->B");
        assert_eq!(
            extract_code_block("Here you go:\n```mermaid\nflowchart TD\n  A --> B\n```\nDone."),
            "flowchart TD\n  A --> B"
        );
        assert_eq!(extract_code_block("```\n@startuml\nA -> B\n"), "@startuml\nA -> B");
        assert_eq!(extract_code_block("```"), "");
        assert_eq!(extract_code_block("```A --> B```"), "A --> B");
    }
}

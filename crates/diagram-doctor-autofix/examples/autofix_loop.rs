//! Runs the auto-fix loop against an in-process bracket checker and a canned "model".
//!
//! ```sh
//! RUST_LOG=debug cargo run -p diagram-doctor-autofix --example autofix_loop
//! ```

use async_trait::async_trait;
use diagram_doctor::{MemoryStore, UnhandledErrorLog, analyze_error, apply_fix};
use diagram_doctor_autofix::{AutoFixController, RepairModel, Validation, Validator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Rejects flowcharts with an unclosed `[` the way the Mermaid parser reports it.
struct BracketValidator;

#[async_trait]
impl Validator for BracketValidator {
    async fn validate(&self, code: &str, _diagram_type: &str) -> anyhow::Result<Validation> {
        for (index, line) in code.lines().enumerate() {
            if line.matches('[').count() > line.matches(']').count() {
                let pointer = "-".repeat(line.chars().count() + 3);
                return Ok(Validation::invalid(format!(
                    "Parse error on line {}:\n...{line}\n{pointer}^\nExpecting 'SQE', 'PE', got 'EOF'",
                    index + 1
                )));
            }
        }
        Ok(Validation::Valid)
    }
}

/// Applies the first quick fix diagram-doctor suggests for the code it is given.
struct QuickFixModel {
    validator: BracketValidator,
}

#[async_trait]
impl RepairModel for QuickFixModel {
    async fn complete(&self, prompt: &str, code: &str) -> anyhow::Result<String> {
        println!("--- prompt ---\n{prompt}");
        let Validation::Invalid { error } = self.validator.validate(code, "mermaid").await? else {
            return Ok(code.to_string());
        };
        let record = analyze_error(&error, "mermaid", Some(code));
        let repaired = match record.preferred_fix() {
            Some(fix) => apply_fix(code, fix),
            None => code.to_string(),
        };
        Ok(format!("```mermaid\n{repaired}\n```"))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let log = Arc::new(UnhandledErrorLog::with_defaults(Arc::new(MemoryStore::new())));
    let controller = AutoFixController::new(
        Arc::new(BracketValidator),
        Arc::new(QuickFixModel {
            validator: BracketValidator,
        }),
    )
    .with_unhandled_log(log.clone());

    let source = "flowchart TD\n    A[Start --> B\n    B[Done] --> C";
    let outcome = controller.run(source, "mermaid", None).await?;

    println!("--- outcome ---");
    println!("valid: {}, attempts: {}", outcome.is_valid(), outcome.attempts());
    println!("{}", outcome.code());
    println!("unhandled errors logged: {}", log.stats().total);
    Ok(())
}

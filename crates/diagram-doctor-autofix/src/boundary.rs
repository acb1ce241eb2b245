//! Collaborators the controller consumes; implementations live in the host.

use async_trait::async_trait;

/// Result of validating diagram source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The source compiles.
    Valid,
    /// The source is rejected with a raw compiler message.
    Invalid {
        /// Raw error text, passed to the extractors verbatim.
        error: String,
    },
}

impl Validation {
    /// Shorthand for [`Validation::Invalid`].
    pub fn invalid(error: impl Into<String>) -> Self {
        Self::Invalid {
            error: error.into(),
        }
    }
}

/// Compiles or renders diagram source.
///
/// An `Err` means the validator itself is unavailable (for example a remote renderer is
/// unreachable), not that the source is invalid.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Validate `code` as a diagram of `diagram_type`.
    async fn validate(&self, code: &str, diagram_type: &str) -> anyhow::Result<Validation>;
}

/// Generative model asked to repair diagram source.
#[async_trait]
pub trait RepairModel: Send + Sync {
    /// Complete `prompt` for the current `code`; the response is treated as replacement source.
    async fn complete(&self, prompt: &str, code: &str) -> anyhow::Result<String>;
}

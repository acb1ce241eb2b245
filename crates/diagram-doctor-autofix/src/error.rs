//! Errors surfaced by the auto-fix controller.

use thiserror::Error;

#[derive(Debug, Error)]
/// Failures that abort an auto-fix run.
///
/// A run that merely fails to produce valid code is not an error; it ends in
/// [`crate::AutoFixOutcome::Exhausted`].
pub enum AutoFixError {
    #[error("repair model failed on attempt {attempt}: {source}")]
    /// The generative model could not be reached or returned an error.
    RepairModel {
        /// 1-based attempt number that failed.
        attempt: usize,
        /// The model's error.
        #[source]
        source: anyhow::Error,
    },
}

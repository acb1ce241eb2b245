#![warn(missing_docs)]
//! Auto-fix loop for diagram sources.
//!
//! Validates diagram code through a host-supplied [`Validator`] and, while it is invalid, asks a
//! host-supplied [`RepairModel`] for a corrected version. Every rejection is analyzed with
//! [`diagram_doctor::analyze_error`] so the model sees a classified, positioned error and the
//! preferred quick fix. The number of model calls is bounded by [`AutoFixConfig::max_attempts`].
//!
//! ```rust,no_run
//! use diagram_doctor_autofix::{AutoFixController, RepairModel, Validator};
//! use std::sync::Arc;
//!
//! # async fn demo(validator: Arc<dyn Validator>, model: Arc<dyn RepairModel>) -> anyhow::Result<()> {
//! let controller = AutoFixController::new(validator, model);
//! let outcome = controller.run("flowchart TD\n  A[Start --> B", "mermaid", None).await?;
//! if outcome.is_valid() {
//!     println!("{}", outcome.code());
//! }
//! # Ok(())
//! # }
//! ```

pub mod boundary;
pub mod controller;
pub mod error;
pub mod prompt;

pub use boundary::{RepairModel, Validation, Validator};
pub use controller::{AutoFixConfig, AutoFixController, AutoFixOutcome, ValidationFailure};
pub use error::AutoFixError;
pub use prompt::{RepairPromptBuilder, extract_code_block};

//! The bounded validate / repair / re-validate loop.

use crate::boundary::{RepairModel, Validation, Validator};
use crate::error::AutoFixError;
use crate::prompt::{RepairPromptBuilder, extract_code_block};
use diagram_doctor::{ErrorRecord, UnhandledErrorLog, analyze_error};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Configuration for the auto-fix controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoFixConfig {
    /// Maximum number of repair-model calls per run.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Whether the preferred fix suggestion is passed to the model as a hint.
    #[serde(default = "default_include_fix_hint")]
    pub include_fix_hint: bool,
}

impl Default for AutoFixConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            include_fix_hint: default_include_fix_hint(),
        }
    }
}

fn default_max_attempts() -> usize {
    2
}

fn default_include_fix_hint() -> bool {
    true
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Raw error text (the validator's own error when it was unavailable).
    pub error: String,
    /// Analysis of `error`; absent when the validator was unavailable.
    pub record: Option<ErrorRecord>,
    /// The validator failed rather than rejecting the code.
    pub validator_unavailable: bool,
}

/// How an auto-fix run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoFixOutcome {
    /// The input was valid; no model call was made.
    AlreadyValid {
        /// The input, unchanged.
        code: String,
    },
    /// A candidate validated.
    Repaired {
        /// The valid candidate.
        code: String,
        /// Model calls made.
        attempts: usize,
    },
    /// The budget ran out while still invalid.
    Exhausted {
        /// The last candidate (the input if no attempt was made).
        code: String,
        /// The last known error.
        failure: ValidationFailure,
        /// Model calls made.
        attempts: usize,
    },
}

impl AutoFixOutcome {
    /// The resulting code: valid for `AlreadyValid` / `Repaired`, best effort for `Exhausted`.
    pub fn code(&self) -> &str {
        match self {
            Self::AlreadyValid { code }
            | Self::Repaired { code, .. }
            | Self::Exhausted { code, .. } => code,
        }
    }

    /// Returns `true` if the resulting code validated.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Exhausted { .. })
    }

    /// Number of repair-model calls made.
    pub fn attempts(&self) -> usize {
        match self {
            Self::AlreadyValid { .. } => 0,
            Self::Repaired { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Drives the auto-fix loop for one host.
///
/// Validation and repair calls within one [`run`](Self::run) are strictly sequential. The
/// controller keeps no state between runs.
pub struct AutoFixController {
    validator: Arc<dyn Validator>,
    model: Arc<dyn RepairModel>,
    config: AutoFixConfig,
    unhandled: Option<Arc<UnhandledErrorLog>>,
}

impl AutoFixController {
    /// Creates a controller with the default configuration.
    pub fn new(validator: Arc<dyn Validator>, model: Arc<dyn RepairModel>) -> Self {
        Self::with_config(validator, model, AutoFixConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    pub fn with_config(
        validator: Arc<dyn Validator>,
        model: Arc<dyn RepairModel>,
        config: AutoFixConfig,
    ) -> Self {
        Self {
            validator,
            model,
            config,
            unhandled: None,
        }
    }

    /// Route errors that cannot be positioned to `log`.
    pub fn with_unhandled_log(mut self, log: Arc<UnhandledErrorLog>) -> Self {
        self.unhandled = Some(log);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AutoFixConfig {
        &self.config
    }

    /// Validate `code` and, while it is invalid and the budget lasts, ask the model for a repair.
    ///
    /// `known_error` skips the initial validation when the caller already has the error.
    ///
    /// # Errors
    ///
    /// Returns [`AutoFixError::RepairModel`] as soon as a model call fails. Running out of
    /// attempts is not an error; see [`AutoFixOutcome::Exhausted`].
    #[instrument(skip(self, code, known_error), fields(diagram_type = %diagram_type))]
    pub async fn run(
        &self,
        code: &str,
        diagram_type: &str,
        known_error: Option<&str>,
    ) -> Result<AutoFixOutcome, AutoFixError> {
        let mut failure = match known_error {
            Some(error) => self.failure_for(error, diagram_type, code),
            None => match self.check(code, diagram_type).await {
                Some(failure) => failure,
                None => {
                    debug!("diagram is already valid");
                    return Ok(AutoFixOutcome::AlreadyValid {
                        code: code.to_string(),
                    });
                }
            },
        };

        let mut candidate = code.to_string();
        let mut budget = self.config.max_attempts;
        let mut attempts = 0;

        while attempts < budget {
            if failure.validator_unavailable {
                // One repair on raw text only, then stop.
                budget = budget.min(attempts + 1);
            }
            attempts += 1;

            let prompt = RepairPromptBuilder::new(diagram_type, &candidate, &failure)
                .with_fix_hint(self.config.include_fix_hint)
                .build();
            let response = self
                .model
                .complete(&prompt, &candidate)
                .await
                .map_err(|source| {
                    warn!(attempt = attempts, error = %source, "repair model failed");
                    AutoFixError::RepairModel {
                        attempt: attempts,
                        source,
                    }
                })?;
            candidate = extract_code_block(&response);

            match self.check(&candidate, diagram_type).await {
                None => {
                    info!(attempts, "repair produced valid diagram");
                    return Ok(AutoFixOutcome::Repaired {
                        code: candidate,
                        attempts,
                    });
                }
                Some(next) => {
                    debug!(attempt = attempts, error = %next.error, "candidate still invalid");
                    failure = next;
                }
            }
        }

        info!(attempts, "repair budget exhausted");
        Ok(AutoFixOutcome::Exhausted {
            code: candidate,
            failure,
            attempts,
        })
    }

    /// Validate once; `None` means valid.
    async fn check(&self, code: &str, diagram_type: &str) -> Option<ValidationFailure> {
        match self.validator.validate(code, diagram_type).await {
            Ok(Validation::Valid) => None,
            Ok(Validation::Invalid { error }) => Some(self.failure_for(&error, diagram_type, code)),
            Err(err) => {
                warn!(error = %err, "validator unavailable");
                Some(ValidationFailure {
                    error: err.to_string(),
                    record: None,
                    validator_unavailable: true,
                })
            }
        }
    }

    fn failure_for(&self, error: &str, diagram_type: &str, code: &str) -> ValidationFailure {
        let record = analyze_error(error, diagram_type, Some(code));
        if let Some(log) = &self.unhandled {
            log.log(error, diagram_type, &record);
        }
        ValidationFailure {
            error: error.to_string(),
            record: Some(record),
            validator_unavailable: false,
        }
    }
}

//! Log of errors no extractor could position.
//!
//! Such errors point at gaps in the extractor patterns. They are collected in one bounded,
//! de-duplicated list stored under a single key of a [`KeyValueStore`], and can be grouped,
//! summarized and exported for pattern maintenance.
//!
//! Logging is best-effort: storage failures are reported through [`LogOutcome`] and a warning,
//! never to the caller as an error.

use crate::error::StoreError;
use crate::record::ErrorRecord;
use crate::store::KeyValueStore;
use crate::text::truncate_chars;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Configuration for the unhandled-error log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnhandledLogConfig {
    /// Key the whole collection is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Capacity; the oldest entries are evicted first.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Error text is truncated to this many characters before storing and comparing.
    #[serde(default = "default_max_error_len")]
    pub max_error_len: usize,
    /// Identical errors for the same format within this window are logged once.
    #[serde(default = "default_dedup_window_secs")]
    pub dedup_window_secs: u64,
}

impl Default for UnhandledLogConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            max_entries: default_max_entries(),
            max_error_len: default_max_error_len(),
            dedup_window_secs: default_dedup_window_secs(),
        }
    }
}

impl UnhandledLogConfig {
    /// The de-duplication window as a duration.
    pub fn dedup_window(&self) -> Duration {
        i64::try_from(self.dedup_window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

fn default_storage_key() -> String {
    "diagram-doctor.unhandled-errors".to_string()
}

fn default_max_entries() -> usize {
    100
}

fn default_max_error_len() -> usize {
    500
}

fn default_dedup_window_secs() -> u64 {
    3600
}

/// The part of the analysis kept alongside a logged error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSummary {
    /// Extracted line (absent for every logged entry written by this crate).
    pub line: Option<usize>,
    /// Extracted column.
    pub column: Option<usize>,
    /// Category code.
    pub code: Option<String>,
    /// Expected token.
    pub expected: Option<String>,
    /// Found token.
    pub found: Option<String>,
}

impl From<&ErrorRecord> for ParsedSummary {
    fn from(record: &ErrorRecord) -> Self {
        Self {
            line: record.line,
            column: record.column,
            code: record.code.clone(),
            expected: record.expected.clone(),
            found: record.found.clone(),
        }
    }
}

/// One logged error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnhandledErrorEntry {
    /// Random v4 UUID.
    pub id: String,
    /// When the error was logged.
    pub timestamp: DateTime<Utc>,
    /// Format tag.
    pub diagram_type: String,
    /// Raw error text, truncated.
    pub error_text: String,
    /// What the analysis did recover.
    pub parsed: ParsedSummary,
}

/// What [`UnhandledErrorLog::log`] did with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutcome {
    /// The error had a line, so it is handled and was not logged.
    Positioned,
    /// An identical error for the same format was logged within the window.
    Duplicate,
    /// Stored; `evicted` older entries were dropped to stay within capacity.
    Stored {
        /// Entries evicted by this write.
        evicted: usize,
    },
    /// The store failed; nothing was written.
    StorageFailed,
}

/// Per-format summary produced by [`UnhandledErrorLog::grouped_by_format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatGroup {
    /// Format tag.
    pub diagram_type: String,
    /// Number of entries.
    pub count: usize,
    /// Up to N distinct error texts, most recent first.
    pub samples: Vec<String>,
}

/// Aggregate statistics over the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogStats {
    /// Number of entries.
    pub total: usize,
    /// Number of distinct formats.
    pub formats: usize,
    /// Entry count per format.
    pub by_format: BTreeMap<String, usize>,
    /// Timestamp of the oldest entry.
    pub oldest: Option<DateTime<Utc>>,
    /// Timestamp of the newest entry.
    pub newest: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    exported_at: DateTime<Utc>,
    stats: LogStats,
    errors: &'a [UnhandledErrorEntry],
}

/// Bounded, de-duplicated log of unpositioned errors.
pub struct UnhandledErrorLog {
    store: Arc<dyn KeyValueStore>,
    config: UnhandledLogConfig,
    // Serializes read-modify-write cycles on the stored list.
    write_lock: Mutex<()>,
}

impl UnhandledErrorLog {
    /// Creates a log over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>, config: UnhandledLogConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a log over `store` with the default configuration.
    pub fn with_defaults(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, UnhandledLogConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &UnhandledLogConfig {
        &self.config
    }

    /// Log an error unless it was positioned or is a recent duplicate.
    pub fn log(&self, error_text: &str, diagram_type: &str, parsed: &ErrorRecord) -> LogOutcome {
        self.log_at(Utc::now(), error_text, diagram_type, parsed)
    }

    /// [`log`](Self::log) with an explicit clock.
    pub fn log_at(
        &self,
        now: DateTime<Utc>,
        error_text: &str,
        diagram_type: &str,
        parsed: &ErrorRecord,
    ) -> LogOutcome {
        if parsed.line.is_some() {
            return LogOutcome::Positioned;
        }

        let error_text = truncate_chars(error_text, self.config.max_error_len);
        let _guard = self.write_lock.lock();

        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StoreError::Serialization(err)) => {
                warn!(error = %err, key = %self.config.storage_key, "discarding unreadable unhandled-error log");
                Vec::new()
            }
            Err(err) => {
                warn!(error = %err, "failed to read unhandled-error log");
                return LogOutcome::StorageFailed;
            }
        };

        let window = self.config.dedup_window();
        let duplicate = entries.iter().any(|entry| {
            entry.diagram_type == diagram_type
                && entry.error_text == error_text
                && now.signed_duration_since(entry.timestamp) < window
        });
        if duplicate {
            debug!(diagram_type, "unhandled error already logged within window");
            return LogOutcome::Duplicate;
        }

        entries.push(UnhandledErrorEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: now,
            diagram_type: diagram_type.to_string(),
            error_text,
            parsed: ParsedSummary::from(parsed),
        });
        let evicted = entries.len().saturating_sub(self.config.max_entries);
        entries.drain(..evicted);

        match self.save(&entries) {
            Ok(()) => {
                debug!(diagram_type, total = entries.len(), evicted, "logged unhandled error");
                LogOutcome::Stored { evicted }
            }
            Err(err) => {
                warn!(error = %err, "failed to write unhandled-error log");
                LogOutcome::StorageFailed
            }
        }
    }

    fn load(&self) -> Result<Vec<UnhandledErrorEntry>, StoreError> {
        match self.store.get(&self.config.storage_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, entries: &[UnhandledErrorEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.config.storage_key, &raw)
    }

    /// All entries, oldest first. Unreadable storage reads as empty.
    pub fn entries(&self) -> Vec<UnhandledErrorEntry> {
        self.load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read unhandled-error log");
            Vec::new()
        })
    }

    /// Entries grouped by format, largest group first, each with up to `samples` distinct error
    /// texts (most recent first).
    pub fn grouped_by_format(&self, samples: usize) -> Vec<FormatGroup> {
        let mut groups: BTreeMap<String, FormatGroup> = BTreeMap::new();
        for entry in self.entries().iter().rev() {
            let group = groups
                .entry(entry.diagram_type.clone())
                .or_insert_with(|| FormatGroup {
                    diagram_type: entry.diagram_type.clone(),
                    count: 0,
                    samples: Vec::new(),
                });
            group.count += 1;
            if group.samples.len() < samples && !group.samples.contains(&entry.error_text) {
                group.samples.push(entry.error_text.clone());
            }
        }

        let mut groups = groups.into_values().collect::<Vec<_>>();
        groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.diagram_type.cmp(&b.diagram_type)));
        groups
    }

    /// Aggregate statistics.
    pub fn stats(&self) -> LogStats {
        stats_of(&self.entries())
    }

    /// Pretty-printed JSON `{ exportedAt, stats, errors }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be serialized.
    pub fn export_json(&self) -> Result<String, StoreError> {
        self.export_json_at(Utc::now())
    }

    /// [`export_json`](Self::export_json) with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the export cannot be serialized.
    pub fn export_json_at(&self, now: DateTime<Utc>) -> Result<String, StoreError> {
        let errors = self.entries();
        let export = Export {
            exported_at: now,
            stats: stats_of(&errors),
            errors: &errors,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    /// Delete every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock();
        self.store.remove(&self.config.storage_key)
    }
}

fn stats_of(entries: &[UnhandledErrorEntry]) -> LogStats {
    let mut by_format = BTreeMap::new();
    for entry in entries {
        *by_format.entry(entry.diagram_type.clone()).or_insert(0) += 1;
    }
    LogStats {
        total: entries.len(),
        formats: by_format.len(),
        by_format,
        oldest: entries.iter().map(|e| e.timestamp).min(),
        newest: entries.iter().map(|e| e.timestamp).max(),
    }
}

//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by a [`crate::store::KeyValueStore`].
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    /// The backing store cannot be reached at all.
    Unavailable(String),

    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    /// Writing the value would exceed the store's size limit.
    QuotaExceeded {
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured byte limit.
        limit: usize,
    },

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    /// A stored value could not be encoded or decoded.
    Serialization(#[from] serde_json::Error),
}

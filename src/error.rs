//! Error taxonomy shared by the history store, the edit pipeline, the external
//! service clients and persistence.
//!
//! History errors are programming errors and are logged, never retried.
//! Generation and transaction errors are expected at runtime and end up in a
//! UI-facing message with a retry affordance. Storage errors are non-fatal.

use thiserror::Error;

/// Misuse of the edit history store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// An operation needed a seeded history (or a consistent snapshot).
    #[error("invalid history state: {0}")]
    InvalidState(&'static str),

    /// `seek` was given an index outside `[0, len)`.
    #[error("history index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

/// The image service refused, failed, or produced nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("request blocked: {0}")]
    Blocked(String),

    #[error("image service error: {0}")]
    Service(String),

    #[error("no image returned: {0}")]
    NoResult(String),
}

/// A wallet, upload or mint call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("no wallet account available")]
    NoWallet,

    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("minting misconfigured: {0}")]
    Misconfigured(String),

    #[error("network error: {0}")]
    Network(String),
}

/// Persistence read/write failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize stored value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Problems reading or converting an image artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Why an edit request did not produce a committed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("another edit is already in progress")]
    Busy,

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<ArtifactError> for GenerationError {
    fn from(err: ArtifactError) -> Self {
        GenerationError::NoResult(err.to_string())
    }
}

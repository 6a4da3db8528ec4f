//! Error types for ranksort

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by ranksort
///
/// The sorter's decision operations never fail; everything here comes from
/// the edges: persistence, configuration and caller input.
#[derive(Error, Debug)]
pub enum Error {
    /// Persisted state could not be read, written or decoded
    #[error("storage error: {0}")]
    Storage(String),

    /// Persisted state decoded but violates the sorter invariants
    #[error("invalid sort state: {0}")]
    InvalidState(String),

    /// Configuration file or environment override is invalid
    #[error("config error: {0}")]
    Config(String),

    /// No sort has been stored under this key
    #[error("no sort stored under key '{0}'")]
    UnknownKey(String),

    /// A tie was requested while ties are disabled
    #[error("ties are disabled for this sort")]
    TiesDisabled,

    /// Caller supplied something unusable (bad key, empty item file, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Something that should not happen
    #[error("internal error: {0}")]
    Internal(String),
}

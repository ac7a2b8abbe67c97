// crates/triplog-core/src/error.rs

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TripError>;

/// Error taxonomy for trip operations.
///
/// Index-based plan operations validate bounds before mutating anything, so a
/// returned [`TripError::InvalidIndex`] guarantees the plan is unchanged.
#[derive(Debug, Error)]
pub enum TripError {
    /// An index-based plan operation was called with an out-of-range
    /// (or forbidden, e.g. position 0 for routes) index.
    #[error("index {index} is invalid for a plan of length {len}")]
    InvalidIndex { index: usize, len: usize },

    /// A trip or record id does not exist in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// The geocoding or persistence collaborator failed or timed out.
    /// Core state is unchanged; the caller may retry.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// An import payload is missing required keys or is not valid JSON.
    /// The whole import is rejected; no partial trip is created.
    #[error("malformed import: {0}")]
    MalformedImport(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

//! Errors from the key/value storage seam
//!
//! Gameplay itself never fails; only writing to the store can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No storage backend (private browsing, no window, ...)
    #[error("storage is not available")]
    Unavailable,
    /// The backend refused the operation (quota exceeded, ...)
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

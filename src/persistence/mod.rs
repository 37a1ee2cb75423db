//! Progress persistence
//!
//! Features:
//! - JSON record `{unlockedLevels, highScores}` shared with older saves
//! - Merge-on-save: stored values are never lowered
//! - Failures are reported as `StorageError` and handled by the caller

pub mod progress;

pub use progress::Progress;

use thiserror::Error;

/// Why a storage operation failed
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

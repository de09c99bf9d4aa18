//! Errors at the storage boundary
//!
//! Editing itself never fails; only encoding, decoding and writing do.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrillError {
    /// JSON was malformed or didn't match the expected shape
    #[error("invalid drill data: {0}")]
    Json(#[from] serde_json::Error),

    /// Saved by a newer build
    #[error("unsupported save version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The platform store refused the write
    #[error("storage error: {0}")]
    Storage(String),

    /// No drill with this id in the library
    #[error("unknown drill '{0}'")]
    UnknownDrill(String),

    /// The editor session was already saved or discarded
    #[error("editor session is closed")]
    SessionClosed,
}

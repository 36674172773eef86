use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("Queue lock unavailable: {} (gave up after {retries} attempts)", path.display())]
    LockUnavailable { path: PathBuf, retries: u32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid hook type: {0}. Must be one of: pre-tool-use, post-tool-use")]
    InvalidHookType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SidecarError {
    /// True when the failure was lock contention rather than storage.
    pub fn is_lock_unavailable(&self) -> bool {
        matches!(self, SidecarError::LockUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, SidecarError>;

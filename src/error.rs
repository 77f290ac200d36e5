//! Unified error types for the texture inbox core.

use std::fmt;
use std::io;

/// Application-specific errors.
#[derive(Debug)]
pub enum AppError {
    /// Error reading or writing the persisted project state document.
    StatePersistence(String),
    /// Error listing or claiming files from the watch folder.
    WatchFolderScan(String),
    /// Error moving a staged file into permanent texture storage.
    TextureCommit(String),
    /// Error removing a discarded staged file.
    ReviewDiscard(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StatePersistence(msg) => write!(f, "state persistence error: {}", msg),
            AppError::WatchFolderScan(msg) => write!(f, "watch folder scan error: {}", msg),
            AppError::TextureCommit(msg) => write!(f, "texture commit error: {}", msg),
            AppError::ReviewDiscard(msg) => write!(f, "review discard error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::WatchFolderScan(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StatePersistence(err.to_string())
    }
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, AppError>;

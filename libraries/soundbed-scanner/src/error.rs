//! Error types for folder scanning

use std::path::PathBuf;
use thiserror::Error;

/// Scanning errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Folder does not exist
    #[error("Folder not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Location exists but is not a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Location string could not be interpreted
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A tree URI was given but no tree backend is registered
    #[error("No document tree backend for {0}")]
    TreeUnavailable(String),

    /// Tree backend failure
    #[error("Document tree error: {0}")]
    Tree(String),

    /// Directory walk failed
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Create a tree backend error
    pub fn tree(msg: impl Into<String>) -> Self {
        Self::Tree(msg.into())
    }
}

/// Result type for scanning operations
pub type Result<T> = std::result::Result<T, ScanError>;

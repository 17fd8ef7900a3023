//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Fades are scheduled on tokio; the controller was built outside a runtime
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

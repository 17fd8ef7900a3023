/// Core error types for Soundbed
use thiserror::Error;

/// Result type for audio engine commands
pub type EngineResult<T = ()> = std::result::Result<T, EngineError>;

/// Failure reported by an [`AudioEngine`](crate::AudioEngine) command
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine was released and can no longer accept commands
    #[error("Audio engine has been released")]
    Released,

    /// The queue has no item at the requested position
    #[error("No queue item at position {0}")]
    NoSuchItem(usize),

    /// Backend-specific failure
    #[error("Audio engine error: {0}")]
    Backend(String),
}

impl EngineError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// Derived from the engine's transport flag and controller bookkeeping, not
/// stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No engine installed
    Idle,

    /// Engine ready, nothing started since the last playlist load
    Stopped,

    /// Engine advancing (volume audible or ramping)
    Playing,

    /// Engine halted after having played
    Paused,
}

/// Durations of the transport fades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FadeTimings {
    /// Fade-in after `play` (default: 500ms)
    pub play: Duration,

    /// Fade-out before the engine pauses (default: 500ms)
    pub pause: Duration,

    /// Fade-out before a skip (default: 300ms)
    pub skip_out: Duration,

    /// Fade-in after a skip (default: 500ms)
    pub skip_in: Duration,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            play: Duration::from_millis(500),
            pause: Duration::from_millis(500),
            skip_out: Duration::from_millis(300),
            skip_in: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timings() {
        let timings = FadeTimings::default();
        assert_eq!(timings.play, Duration::from_millis(500));
        assert_eq!(timings.pause, Duration::from_millis(500));
        assert_eq!(timings.skip_out, Duration::from_millis(300));
        assert_eq!(timings.skip_in, Duration::from_millis(500));
    }
}

/// Core traits for Soundbed
use crate::error::EngineResult;
use crate::types::TrackRef;

/// Opaque audio playback capability
///
/// Implementers own decoding and output; Soundbed only issues transport and
/// volume commands. Volume is a linear gain in `[0.0, 1.0]`.
///
/// Commands return [`EngineResult`] so a backend can report failure. The
/// playback controller logs and ignores such failures rather than faulting.
pub trait AudioEngine: Send {
    /// Replace the playback queue
    fn set_queue(&mut self, tracks: &[TrackRef]) -> EngineResult;

    /// Prepare the queue for playback without starting it
    fn prepare(&mut self) -> EngineResult;

    /// Start or resume playback
    fn play(&mut self) -> EngineResult;

    /// Halt playback, keeping the current position
    fn pause(&mut self) -> EngineResult;

    /// Whether the engine is currently advancing
    fn is_playing(&self) -> bool;

    /// Whether a queue item follows the current one
    fn has_next(&self) -> bool;

    /// Whether a queue item precedes the current one
    fn has_previous(&self) -> bool;

    /// Move to the next queue item
    fn seek_next(&mut self) -> EngineResult;

    /// Move to the previous queue item
    fn seek_previous(&mut self) -> EngineResult;

    /// Move to the first queue item, at its default position
    fn seek_to_start(&mut self) -> EngineResult;

    /// Current output volume
    fn volume(&self) -> f32;

    /// Set output volume
    fn set_volume(&mut self, volume: f32) -> EngineResult;

    /// Loop the whole queue when the last item finishes
    fn set_repeat_all(&mut self, enabled: bool) -> EngineResult {
        let _ = enabled;
        Ok(())
    }

    /// Free backend resources
    ///
    /// Called exactly once, right before the engine is dropped.
    fn release(&mut self) {}
}

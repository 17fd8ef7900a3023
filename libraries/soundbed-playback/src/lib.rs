//! Soundbed - Playback Control
//!
//! Background music playback with smooth, cancellable volume fades.
//!
//! This crate provides:
//! - Playlist loading from a scanned folder (shuffled on every load)
//! - A volume fader that ramps in 20 steps on a tokio task
//! - Fade plans chaining ramps with engine commands (fade out → skip → fade in)
//! - A playback controller exposing play/pause/next/prev/set-volume
//!
//! # Architecture
//!
//! `soundbed-playback` does not decode or output audio. The platform supplies
//! an [`AudioEngine`](soundbed_core::AudioEngine) and a
//! [`SettingsStore`](soundbed_core::SettingsStore); the controller only
//! issues transport and volume commands.
//!
//! # Example
//!
//! ```rust,no_run
//! use soundbed_core::{AudioEngine, BgmSettings, EngineResult, MemorySettingsStore, TrackRef};
//! use soundbed_playback::PlaybackController;
//! use soundbed_scanner::TrackScanner;
//! use std::sync::Arc;
//!
//! struct MyEngine { /* platform player */ }
//!
//! impl AudioEngine for MyEngine {
//!     fn set_queue(&mut self, tracks: &[TrackRef]) -> EngineResult { Ok(()) }
//!     fn prepare(&mut self) -> EngineResult { Ok(()) }
//!     fn play(&mut self) -> EngineResult { Ok(()) }
//!     fn pause(&mut self) -> EngineResult { Ok(()) }
//!     fn is_playing(&self) -> bool { false }
//!     fn has_next(&self) -> bool { false }
//!     fn has_previous(&self) -> bool { false }
//!     fn seek_next(&mut self) -> EngineResult { Ok(()) }
//!     fn seek_previous(&mut self) -> EngineResult { Ok(()) }
//!     fn seek_to_start(&mut self) -> EngineResult { Ok(()) }
//!     fn volume(&self) -> f32 { 0.0 }
//!     fn set_volume(&mut self, volume: f32) -> EngineResult { Ok(()) }
//! }
//!
//! # async fn run() -> soundbed_playback::Result<()> {
//! let settings = Arc::new(MemorySettingsStore::new(BgmSettings {
//!     enabled: true,
//!     volume: 80,
//!     source_path: Some("/home/me/Music/ambient".to_string()),
//! }));
//!
//! let mut controller = PlaybackController::new(settings, TrackScanner::new())?;
//! controller.initialize(|| MyEngine {});
//!
//! controller.play(); // scans the folder, fades in to 80%
//! controller.next(); // fades out, skips, fades back in
//! controller.pause(); // fades out, then pauses the engine
//! controller.release();
//! # Ok(())
//! # }
//! ```

mod controller;
mod deck;
mod error;
mod fader;
mod playlist;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use deck::{Deck, SharedDeck};
pub use error::{PlaybackError, Result};
pub use fader::{Completion, EngineCommand, FadeJob, FadePlan, FadeStep, VolumeFader, FADE_STEPS};
pub use playlist::Playlist;
pub use types::{FadeTimings, PlaybackState};

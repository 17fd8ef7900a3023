//! Shared playback state
//!
//! The engine handle, the playlist and the fade epoch sit behind one mutex.
//! Fade steps run on tokio tasks, so every engine access (from the
//! controller or from a fade step) goes through [`SharedDeck`].

use crate::playlist::Playlist;
use parking_lot::Mutex;
use soundbed_core::{AudioEngine, EngineResult};
use std::sync::Arc;

/// Deck shared between the controller and its fade tasks
pub type SharedDeck = Arc<Mutex<Deck>>;

/// Engine handle plus everything fades need to stay consistent with it
#[derive(Default)]
pub struct Deck {
    engine: Option<Box<dyn AudioEngine>>,

    /// Current playlist
    pub(crate) playlist: Playlist,

    /// Bumped whenever a fade starts or is cancelled. A fade step only runs
    /// while the epoch it was started with is still current.
    fade_epoch: u64,
}

impl Deck {
    /// Create an empty deck (no engine, no tracks)
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a deck for sharing
    pub fn shared(self) -> SharedDeck {
        Arc::new(Mutex::new(self))
    }

    /// Install an engine; returns false (and leaves the deck alone) if one is present
    pub fn install(&mut self, engine: Box<dyn AudioEngine>) -> bool {
        if self.engine.is_some() {
            return false;
        }
        self.engine = Some(engine);
        true
    }

    /// Remove the engine, leaving the deck idle
    pub fn take_engine(&mut self) -> Option<Box<dyn AudioEngine>> {
        self.engine.take()
    }

    /// Whether an engine is installed
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Engine, if installed
    pub fn engine(&self) -> Option<&dyn AudioEngine> {
        self.engine.as_deref()
    }

    /// Current playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Engine transport flag; false without an engine
    pub fn is_playing(&self) -> bool {
        self.engine().is_some_and(|engine| engine.is_playing())
    }

    /// Engine volume; 0.0 without an engine
    pub fn volume(&self) -> f32 {
        self.engine().map_or(0.0, |engine| engine.volume())
    }

    /// Write the engine volume, ignoring a missing engine
    pub fn write_volume(&mut self, volume: f32) {
        self.run("set_volume", |engine| engine.set_volume(volume));
    }

    /// Run an engine command, logging instead of failing
    ///
    /// No-op without an engine.
    pub fn run(&mut self, command: &str, f: impl FnOnce(&mut dyn AudioEngine) -> EngineResult) {
        let Some(engine) = self.engine.as_deref_mut() else {
            tracing::trace!("Skipping {}: no engine", command);
            return;
        };

        if let Err(e) = f(engine) {
            tracing::warn!("Engine command {} failed: {}", command, e);
        }
    }

    /// Invalidate any running fade and return the new epoch
    pub(crate) fn next_epoch(&mut self) -> u64 {
        self.fade_epoch = self.fade_epoch.wrapping_add(1);
        self.fade_epoch
    }

    /// Whether a fade started at `epoch` may still touch the engine
    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.fade_epoch == epoch
    }
}

impl std::fmt::Debug for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deck")
            .field("engine", &self.engine.is_some())
            .field("playlist", &self.playlist)
            .field("fade_epoch", &self.fade_epoch)
            .finish()
    }
}

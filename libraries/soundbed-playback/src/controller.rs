//! Playback controller - core orchestration
//!
//! Coordinates scanner, playlist, fader and the audio engine. Every transport
//! operation is fire-and-forget: it schedules fades and returns immediately,
//! and anything that cannot be done (feature disabled, nothing to play,
//! engine released) is a silent no-op.

use crate::{
    deck::{Deck, SharedDeck},
    error::Result,
    fader::{EngineCommand, FadePlan, VolumeFader},
    playlist::Playlist,
    types::{FadeTimings, PlaybackState},
};
use soundbed_core::settings::MAX_VOLUME;
use soundbed_core::{AudioEngine, SettingsStore};
use soundbed_scanner::TrackScanner;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Background music controller
///
/// State machine: `Idle → (initialize) → Stopped ⇄ Playing ⇄ Paused`.
///
/// The controller owns the engine from [`initialize`](Self::initialize) until
/// [`release`](Self::release). Dropping the controller releases the engine too.
///
/// All methods are expected to be called from one control context. Fade
/// steps run on the tokio runtime captured at construction and share the
/// engine with the controller through a single mutex.
pub struct PlaybackController {
    deck: SharedDeck,
    fader: VolumeFader,
    scanner: TrackScanner,
    settings: Arc<dyn SettingsStore>,
    timings: FadeTimings,

    /// Whether playback started since the last load (Paused vs Stopped)
    started: bool,
}

impl PlaybackController {
    /// Create a controller on the current tokio runtime
    pub fn new(settings: Arc<dyn SettingsStore>, scanner: TrackScanner) -> Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(settings, scanner, runtime))
    }

    /// Create a controller that schedules fades on `runtime`
    pub fn with_runtime(
        settings: Arc<dyn SettingsStore>,
        scanner: TrackScanner,
        runtime: Handle,
    ) -> Self {
        let deck = Deck::new().shared();
        Self {
            fader: VolumeFader::new(deck.clone(), runtime),
            deck,
            scanner,
            settings,
            timings: FadeTimings::default(),
            started: false,
        }
    }

    /// Override fade durations
    pub fn with_timings(mut self, timings: FadeTimings) -> Self {
        self.timings = timings;
        self
    }

    // ===== Lifecycle =====

    /// Install the audio engine
    ///
    /// `create` is only called when no engine is installed; a second call is
    /// a no-op. The engine loops its queue and starts silent so the first
    /// `play` fades in. Returns whether an engine was installed.
    pub fn initialize<E, F>(&mut self, create: F) -> bool
    where
        E: AudioEngine + 'static,
        F: FnOnce() -> E,
    {
        let mut deck = self.deck.lock();
        if deck.has_engine() {
            tracing::debug!("Engine already initialized");
            return false;
        }

        let mut engine = create();
        if let Err(e) = engine.set_repeat_all(true) {
            tracing::warn!("Engine command set_repeat_all failed: {}", e);
        }
        if let Err(e) = engine.set_volume(0.0) {
            tracing::warn!("Engine command set_volume failed: {}", e);
        }

        deck.install(Box::new(engine));
        self.started = false;
        tracing::info!("Audio engine initialized");
        true
    }

    /// Whether an engine is installed
    pub fn is_initialized(&self) -> bool {
        self.deck.lock().has_engine()
    }

    /// Cancel fades, release the engine and clear the playlist
    ///
    /// Safe to call repeatedly; later calls do nothing.
    pub fn release(&mut self) {
        self.fader.cancel();

        let engine = {
            let mut deck = self.deck.lock();
            deck.playlist.clear();
            deck.take_engine()
        };
        self.started = false;

        if let Some(mut engine) = engine {
            engine.release();
            tracing::info!("Audio engine released");
        }
    }

    // ===== Playlist =====

    /// Scan the configured folder and queue the result, shuffled
    ///
    /// No-op when no folder is configured or no engine is installed. The
    /// engine is prepared but not started. A scan that finds nothing leaves
    /// an empty playlist.
    pub fn load_playlist(&mut self) {
        if !self.is_initialized() {
            tracing::debug!("No engine, ignoring playlist load");
            return;
        }

        let settings = self.settings.settings();
        let Some(source) = settings.source() else {
            tracing::debug!("No BGM folder configured");
            return;
        };

        let tracks = self.scanner.scan(source);

        let mut deck = self.deck.lock();
        deck.playlist.load(tracks);
        if deck.playlist.is_empty() {
            tracing::info!("No audio files found in {}", source);
            return;
        }

        deck.playlist.shuffle();
        let queue = deck.playlist.tracks().to_vec();
        deck.run("set_queue", |engine| engine.set_queue(&queue));
        deck.run("prepare", |engine| engine.prepare());
        // A reload during playback keeps the session started
        self.started = deck.is_playing();

        tracing::info!("Loaded {} tracks from {}", queue.len(), source);
    }

    /// Snapshot of the current playlist
    pub fn playlist(&self) -> Playlist {
        self.deck.lock().playlist.clone()
    }

    // ===== Transport =====

    /// Start playback with a fade-in to the configured volume
    ///
    /// Loads the playlist first when it is empty. No-op when disabled, when
    /// there is nothing to play, or when the engine is already playing.
    pub fn play(&mut self) {
        let settings = self.settings.settings();
        if !settings.enabled {
            tracing::debug!("BGM disabled, ignoring play");
            return;
        }

        if self.deck.lock().playlist.is_empty() {
            self.load_playlist();
        }

        {
            let mut deck = self.deck.lock();
            if deck.playlist.is_empty() || !deck.has_engine() || deck.is_playing() {
                return;
            }
            deck.run("play", |engine| engine.play());
            if !deck.is_playing() {
                tracing::debug!("Engine did not start, skipping fade-in");
                return;
            }
        }

        self.started = true;
        tracing::debug!("Play, fading in to {}", settings.target_gain());
        self.fader
            .run(FadePlan::new().ramp(settings.target_gain(), self.timings.play));
    }

    /// Fade out, then pause the engine
    ///
    /// The engine keeps playing until the fade-out finishes. No-op when not
    /// playing.
    pub fn pause(&mut self) {
        if !self.is_playing() {
            return;
        }

        tracing::debug!("Pause, fading out");
        self.fader.run(
            FadePlan::new()
                .ramp(0.0, self.timings.pause)
                .then(EngineCommand::Pause),
        );
    }

    /// Fade out, move to the next track, fade back in
    ///
    /// Wraps to the first track when there is no next one.
    pub fn next(&mut self) {
        self.skip(EngineCommand::SkipForward);
    }

    /// Fade out, move to the previous track, fade back in
    ///
    /// Stays on the current track when there is no previous one.
    pub fn prev(&mut self) {
        self.skip(EngineCommand::SkipBackward);
    }

    fn skip(&mut self, command: EngineCommand) {
        let target = self.settings.settings().target_gain();

        tracing::debug!("{:?}, fading back in to {}", command, target);
        self.fader.run(
            FadePlan::new()
                .ramp(0.0, self.timings.skip_out)
                .then(command)
                .ramp(target, self.timings.skip_in),
        );
    }

    /// Pause when playing, play otherwise
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    // ===== Settings =====

    /// Set volume immediately (0-100, clamped)
    ///
    /// Persists the level, cancels any fade and writes the engine volume
    /// without ramping.
    pub fn set_volume(&mut self, level: i32) {
        let level = level.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.settings.set_volume(level);
        self.fader.cancel();
        self.deck
            .lock()
            .write_volume(f32::from(level) / f32::from(MAX_VOLUME));
    }

    /// Persist the enabled flag; enabling plays, disabling pauses
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.set_enabled(enabled);
        if enabled {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Persist a new source folder, reload and play if enabled
    pub fn set_source_path(&mut self, path: Option<String>) {
        self.settings.set_source_path(path);
        self.load_playlist();
        if self.settings.settings().enabled {
            self.play();
        }
    }

    // ===== State =====

    /// Engine transport flag, regardless of any running fade
    pub fn is_playing(&self) -> bool {
        self.deck.lock().is_playing()
    }

    /// Whether a fade is in flight
    pub fn is_fading(&self) -> bool {
        self.fader.is_active()
    }

    /// Derived playback state
    pub fn state(&self) -> PlaybackState {
        let deck = self.deck.lock();
        if !deck.has_engine() {
            PlaybackState::Idle
        } else if deck.is_playing() {
            PlaybackState::Playing
        } else if self.started {
            PlaybackState::Paused
        } else {
            PlaybackState::Stopped
        }
    }

    /// Current engine volume (0.0 without an engine)
    pub fn volume(&self) -> f32 {
        self.deck.lock().volume()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("deck", &*self.deck.lock())
            .field("fader", &self.fader)
            .field("timings", &self.timings)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

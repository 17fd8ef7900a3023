//! Common test utilities and fixtures
#![allow(dead_code)]

use parking_lot::Mutex;
use soundbed_core::{
    AudioEngine, BgmSettings, EngineError, EngineResult, MemorySettingsStore, TrackRef,
};
use soundbed_playback::{Deck, PlaybackController, SharedDeck};
use soundbed_scanner::TrackScanner;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Every command the engine received, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetQueue(usize),
    Prepare,
    Play,
    Pause,
    SeekNext,
    SeekPrevious,
    SeekToStart,
    SetVolume(f32),
    SetRepeatAll(bool),
    Release,
}

#[derive(Debug, Default)]
pub struct EngineState {
    pub calls: Vec<Call>,
    pub queue: Vec<TrackRef>,
    pub position: usize,
    pub playing: bool,
    pub volume: f32,
    pub fail_commands: bool,
}

/// Engine that simulates a queue player and records its commands
///
/// Clones share state, so a test keeps one clone as a probe after handing
/// the other to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    state: Arc<Mutex<EngineState>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose mutating commands all fail
    pub fn failing() -> Self {
        let engine = Self::new();
        engine.state.lock().fail_commands = true;
        engine
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Volumes written, in order
    pub fn volume_writes(&self) -> Vec<f32> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SetVolume(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &Call) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| *call == wanted)
            .count()
    }

    pub fn position(&self) -> usize {
        self.state.lock().position
    }

    pub fn set_position(&self, position: usize) {
        self.state.lock().position = position;
    }

    pub fn queue(&self) -> Vec<TrackRef> {
        self.state.lock().queue.clone()
    }

    pub fn set_queue_len(&self, len: usize) {
        self.state.lock().queue = (0..len)
            .map(|i| TrackRef::new(format!("/music/{i}.mp3")))
            .collect();
    }

    pub fn current_volume(&self) -> f32 {
        self.state.lock().volume
    }

    pub fn playing(&self) -> bool {
        self.state.lock().playing
    }

    fn record(&self, call: Call) -> EngineResult {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.fail_commands {
            return Err(EngineError::backend("simulated failure"));
        }
        Ok(())
    }
}

impl AudioEngine for RecordingEngine {
    fn set_queue(&mut self, tracks: &[TrackRef]) -> EngineResult {
        self.record(Call::SetQueue(tracks.len()))?;
        let mut state = self.state.lock();
        state.queue = tracks.to_vec();
        state.position = 0;
        Ok(())
    }

    fn prepare(&mut self) -> EngineResult {
        self.record(Call::Prepare)
    }

    fn play(&mut self) -> EngineResult {
        self.record(Call::Play)?;
        self.state.lock().playing = true;
        Ok(())
    }

    fn pause(&mut self) -> EngineResult {
        self.record(Call::Pause)?;
        self.state.lock().playing = false;
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn has_next(&self) -> bool {
        let state = self.state.lock();
        state.position + 1 < state.queue.len()
    }

    fn has_previous(&self) -> bool {
        self.state.lock().position > 0
    }

    fn seek_next(&mut self) -> EngineResult {
        self.record(Call::SeekNext)?;
        self.state.lock().position += 1;
        Ok(())
    }

    fn seek_previous(&mut self) -> EngineResult {
        self.record(Call::SeekPrevious)?;
        let mut state = self.state.lock();
        state.position = state.position.saturating_sub(1);
        Ok(())
    }

    fn seek_to_start(&mut self) -> EngineResult {
        self.record(Call::SeekToStart)?;
        self.state.lock().position = 0;
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    fn set_volume(&mut self, volume: f32) -> EngineResult {
        self.record(Call::SetVolume(volume))?;
        self.state.lock().volume = volume;
        Ok(())
    }

    fn set_repeat_all(&mut self, enabled: bool) -> EngineResult {
        self.record(Call::SetRepeatAll(enabled))
    }

    fn release(&mut self) {
        self.state.lock().calls.push(Call::Release);
    }
}

/// Deck holding `engine`, for driving the fader directly
pub fn deck_with(engine: &RecordingEngine) -> SharedDeck {
    let mut deck = Deck::new();
    deck.install(Box::new(engine.clone()));
    deck.shared()
}

/// Folder with `names` written as empty files
pub fn music_folder(names: &[&str]) -> tempfile::TempDir {
    let temp = tempfile::TempDir::new().unwrap();
    for name in names {
        write_file(temp.path(), name);
    }
    temp
}

fn write_file(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"fake audio").unwrap();
}

/// Settings pointing at `folder`
pub fn settings_for(folder: &Path, volume: u8) -> Arc<MemorySettingsStore> {
    Arc::new(MemorySettingsStore::new(BgmSettings {
        enabled: true,
        volume,
        source_path: Some(folder.to_string_lossy().into_owned()),
    }))
}

/// Controller with a recording engine installed; returns the probe clone
pub fn controller_with(settings: Arc<MemorySettingsStore>) -> (PlaybackController, RecordingEngine) {
    let engine = RecordingEngine::new();
    let mut controller = PlaybackController::new(settings, TrackScanner::new()).unwrap();
    let installed = engine.clone();
    assert!(controller.initialize(move || installed));
    engine.clear_calls();
    (controller, engine)
}

/// Let the paused test clock run forward
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

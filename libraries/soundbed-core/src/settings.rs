//! Background music settings
//!
//! The settings are owned by the host application. The playback controller
//! reads them on every operation and writes back only what the user changes
//! through it (volume, enabled flag, source folder).

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Maximum volume level in percent
pub const MAX_VOLUME: u8 = 100;

/// Persisted background music configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgmSettings {
    /// Whether background music may play at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Target volume in percent (0-100)
    #[serde(default = "default_volume")]
    pub volume: u8,

    /// Folder to scan: a filesystem path or a tree URI
    #[serde(default)]
    pub source_path: Option<String>,
}

impl BgmSettings {
    /// Target volume as a linear gain in `[0.0, 1.0]`
    pub fn target_gain(&self) -> f32 {
        f32::from(self.volume.min(MAX_VOLUME)) / f32::from(MAX_VOLUME)
    }

    /// Configured source, or `None` when unset or blank
    pub fn source(&self) -> Option<&str> {
        self.source_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

fn default_enabled() -> bool {
    true
}

fn default_volume() -> u8 {
    50
}

impl Default for BgmSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            volume: default_volume(),
            source_path: None,
        }
    }
}

/// Read/write access to [`BgmSettings`]
///
/// Reads must reflect the latest write. Writes are fire-and-forget: an
/// implementation that persists to disk logs failures instead of returning
/// them.
pub trait SettingsStore: Send + Sync {
    /// Snapshot of the current settings
    fn settings(&self) -> BgmSettings;

    /// Persist the enabled flag
    fn set_enabled(&self, enabled: bool);

    /// Persist the volume (already clamped to 0-100)
    fn set_volume(&self, volume: u8);

    /// Persist the source folder
    fn set_source_path(&self, path: Option<String>);
}

/// In-memory settings store
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: RwLock<BgmSettings>,
}

impl MemorySettingsStore {
    /// Create a store holding `settings`
    pub fn new(settings: BgmSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn settings(&self) -> BgmSettings {
        self.inner.read().clone()
    }

    fn set_enabled(&self, enabled: bool) {
        self.inner.write().enabled = enabled;
    }

    fn set_volume(&self, volume: u8) {
        self.inner.write().volume = volume.min(MAX_VOLUME);
    }

    fn set_source_path(&self, path: Option<String>) {
        self.inner.write().source_path = path;
    }
}

/// File-backed background music settings
use crate::error::Result;
use parking_lot::RwLock;
use soundbed_core::settings::MAX_VOLUME;
use soundbed_core::{BgmSettings, SettingsStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides (`SOUNDBED_VOLUME=40`)
pub const ENV_PREFIX: &str = "SOUNDBED";

/// Default settings file name
pub const DEFAULT_CONFIG_FILE: &str = "soundbed.toml";

/// Settings loaded from a TOML file and written back on every change
///
/// The file holds the flat [`BgmSettings`] keys:
///
/// ```toml
/// enabled = true
/// volume = 80
/// source_path = "/home/me/Music/ambient"
/// ```
///
/// `SOUNDBED_ENABLED`, `SOUNDBED_VOLUME` and `SOUNDBED_SOURCE_PATH` override
/// the file when loading. A missing file yields the defaults.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    inner: RwLock<BgmSettings>,
}

impl FileSettingsStore {
    /// Load settings from `path` and the environment
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = read_settings(&path)?;
        tracing::debug!("Loaded settings from {}: {:?}", path.display(), settings);

        Ok(Self {
            path,
            inner: RwLock::new(settings),
        })
    }

    /// Settings file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current settings to the file
    pub fn save(&self) -> Result<()> {
        let encoded = toml::to_string_pretty(&*self.inner.read())?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    fn update(&self, change: impl FnOnce(&mut BgmSettings)) {
        change(&mut self.inner.write());
        if let Err(e) = self.save() {
            tracing::warn!("Failed to save settings to {}: {}", self.path.display(), e);
        }
    }
}

fn read_settings(path: &Path) -> Result<BgmSettings> {
    let settings = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()?;

    let mut settings: BgmSettings = settings.try_deserialize()?;
    settings.volume = settings.volume.min(MAX_VOLUME);
    Ok(settings)
}

impl SettingsStore for FileSettingsStore {
    fn settings(&self) -> BgmSettings {
        self.inner.read().clone()
    }

    fn set_enabled(&self, enabled: bool) {
        self.update(|settings| settings.enabled = enabled);
    }

    fn set_volume(&self, volume: u8) {
        self.update(|settings| settings.volume = volume.min(MAX_VOLUME));
    }

    fn set_source_path(&self, path: Option<String>) {
        self.update(|settings| settings.source_path = path);
    }
}

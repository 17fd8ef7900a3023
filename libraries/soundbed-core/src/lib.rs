//! Soundbed Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! Soundbed libraries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `TrackRef`, `BgmSettings`
//! - **Core Traits**: `AudioEngine` (the opaque playback capability) and
//!   `SettingsStore` (the persisted BGM configuration)
//! - **Error Handling**: `EngineError` for engine command failures
//!
//! # Example
//!
//! ```rust
//! use soundbed_core::{BgmSettings, MemorySettingsStore, SettingsStore, TrackRef};
//!
//! let store = MemorySettingsStore::new(BgmSettings::default());
//! store.set_volume(80);
//! assert_eq!(store.settings().volume, 80);
//!
//! let track = TrackRef::new("/music/rain.ogg");
//! assert_eq!(track.file_name(), Some("rain.ogg"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod settings;
pub mod traits;
pub mod types;

pub use error::{EngineError, EngineResult};
pub use settings::{BgmSettings, MemorySettingsStore, SettingsStore};
pub use traits::AudioEngine;
pub use types::TrackRef;

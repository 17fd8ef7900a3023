//! Soundbed CLI
//!
//! File-backed settings and a console audio engine for driving the playback
//! controller from a terminal.

pub mod config;
pub mod engine;
pub mod error;

pub use crate::config::FileSettingsStore;
pub use engine::ConsoleEngine;
pub use error::{CliError, Result};

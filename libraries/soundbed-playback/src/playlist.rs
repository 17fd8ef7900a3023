//! Scanned playlist with shuffle and an active-index cursor
//!
//! The playlist is only ever replaced or shuffled as a whole; there is no
//! single-track insert or remove.

use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use soundbed_core::TrackRef;

/// Ordered list of tracks from the last scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<TrackRef>,

    /// Index of the active track (0 when empty)
    active: usize,
}

impl Playlist {
    /// Create empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all tracks, keeping their order, and reset the cursor
    pub fn load(&mut self, tracks: Vec<TrackRef>) {
        self.tracks = tracks;
        self.active = 0;
    }

    /// Remove all tracks
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.active = 0;
    }

    /// Randomize order in place (Fisher-Yates) and reset the cursor
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut thread_rng());
    }

    /// Randomize order with a caller-provided RNG
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tracks.shuffle(rng);
        self.active = 0;
    }

    /// Check if playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// All tracks in play order
    pub fn tracks(&self) -> &[TrackRef] {
        &self.tracks
    }

    /// Index of the active track
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Active track, if any
    pub fn current(&self) -> Option<&TrackRef> {
        self.tracks.get(self.active)
    }

    /// Move to the next track, wrapping to the first after the last
    pub fn advance(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        self.active = (self.active + 1) % self.tracks.len();
    }

    /// Move to the previous track, staying on the first
    pub fn retreat(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    /// Move back to the first track
    pub fn rewind(&mut self) {
        self.active = 0;
    }
}

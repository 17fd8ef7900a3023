/// Console audio engine
///
/// Stands in for a platform player: keeps a queue and a transport flag and
/// logs every command instead of producing sound.
use soundbed_core::{AudioEngine, EngineError, EngineResult, TrackRef};

#[derive(Debug, Default)]
pub struct ConsoleEngine {
    queue: Vec<TrackRef>,
    position: usize,
    playing: bool,
    repeat_all: bool,
    volume: f32,
    released: bool,
}

impl ConsoleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track at the queue position
    pub fn current(&self) -> Option<&TrackRef> {
        self.queue.get(self.position)
    }

    fn check(&self) -> EngineResult {
        if self.released {
            return Err(EngineError::Released);
        }
        Ok(())
    }

    fn announce(&self) {
        if let Some(track) = self.current() {
            tracing::info!(
                "Now at {}/{}: {}",
                self.position + 1,
                self.queue.len(),
                track.file_name().unwrap_or(track.as_str())
            );
        }
    }
}

impl AudioEngine for ConsoleEngine {
    fn set_queue(&mut self, tracks: &[TrackRef]) -> EngineResult {
        self.check()?;
        self.queue = tracks.to_vec();
        self.position = 0;
        tracing::info!("Queued {} tracks", self.queue.len());
        Ok(())
    }

    fn prepare(&mut self) -> EngineResult {
        self.check()?;
        tracing::debug!("Prepared");
        Ok(())
    }

    fn play(&mut self) -> EngineResult {
        self.check()?;
        if self.queue.is_empty() {
            return Err(EngineError::NoSuchItem(0));
        }
        self.playing = true;
        tracing::info!("Playing");
        self.announce();
        Ok(())
    }

    fn pause(&mut self) -> EngineResult {
        self.check()?;
        self.playing = false;
        tracing::info!("Paused");
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn has_next(&self) -> bool {
        self.position + 1 < self.queue.len() || (self.repeat_all && !self.queue.is_empty())
    }

    fn has_previous(&self) -> bool {
        self.position > 0
    }

    fn seek_next(&mut self) -> EngineResult {
        self.check()?;
        if self.queue.is_empty() {
            return Err(EngineError::NoSuchItem(0));
        }
        self.position = (self.position + 1) % self.queue.len();
        self.announce();
        Ok(())
    }

    fn seek_previous(&mut self) -> EngineResult {
        self.check()?;
        if self.position == 0 {
            return Err(EngineError::NoSuchItem(0));
        }
        self.position -= 1;
        self.announce();
        Ok(())
    }

    fn seek_to_start(&mut self) -> EngineResult {
        self.check()?;
        self.position = 0;
        self.announce();
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) -> EngineResult {
        self.check()?;
        self.volume = volume.clamp(0.0, 1.0);
        tracing::trace!("Volume {:.2}", self.volume);
        Ok(())
    }

    fn set_repeat_all(&mut self, enabled: bool) -> EngineResult {
        self.check()?;
        self.repeat_all = enabled;
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.playing = false;
            self.queue.clear();
            tracing::info!("Engine released");
        }
    }
}

//! Volume fader
//!
//! Ramps the engine volume in [`FADE_STEPS`] equal steps on a tokio task.
//! Transport transitions that chain fades with engine commands (fade out,
//! skip, fade in) are described as a [`FadePlan`] and run by one task, so a
//! single cancellation stops the whole transition.
//!
//! # Cancellation
//!
//! Starting a plan or calling [`VolumeFader::cancel`] bumps the deck's fade
//! epoch under the deck lock. Each step re-checks the epoch under the same
//! lock before touching the engine, so once a newer fade has started no step
//! of an older one can write the volume or run its commands.

use crate::deck::{Deck, SharedDeck};
use std::fmt;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Number of volume writes per ramp
pub const FADE_STEPS: u32 = 20;

/// Geometry of one linear volume ramp
///
/// Step `i` (1-based) writes `start + delta * i`; the last step writes the
/// target exactly so float error cannot leave the volume off-target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeJob {
    /// Volume when the ramp started
    pub start_volume: f32,

    /// Volume after the last step
    pub target_volume: f32,

    /// Total ramp duration
    pub duration: Duration,

    /// Number of volume writes
    pub step_count: u32,
}

impl FadeJob {
    /// Create a ramp with the standard step count
    pub fn new(start_volume: f32, target_volume: f32, duration: Duration) -> Self {
        Self {
            start_volume,
            target_volume,
            duration,
            step_count: FADE_STEPS,
        }
    }

    /// Time between steps
    pub fn interval(&self) -> Duration {
        self.duration / self.step_count.max(1)
    }

    /// Volume change per step
    pub fn delta(&self) -> f32 {
        (self.target_volume - self.start_volume) / self.step_count.max(1) as f32
    }

    /// Volume written at `step` (1-based)
    pub fn volume_at(&self, step: u32) -> f32 {
        if step >= self.step_count {
            self.target_volume
        } else {
            self.start_volume + self.delta() * step as f32
        }
    }

    /// Whether the ramp is too short to schedule and should jump to the target
    pub fn is_immediate(&self) -> bool {
        self.step_count == 0 || self.interval().is_zero()
    }
}

/// Engine command issued between ramps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Halt the engine
    Pause,

    /// Next queue item, wrapping to the first when at the end
    SkipForward,

    /// Previous queue item, staying put when at the start
    SkipBackward,
}

impl EngineCommand {
    /// Apply to the deck, keeping the playlist cursor in step with the engine
    fn apply(self, deck: &mut Deck) {
        match self {
            EngineCommand::Pause => deck.run("pause", |engine| engine.pause()),
            EngineCommand::SkipForward => {
                if deck.engine().is_some_and(|engine| engine.has_next()) {
                    deck.run("seek_next", |engine| engine.seek_next());
                    deck.playlist.advance();
                } else {
                    deck.run("seek_to_start", |engine| engine.seek_to_start());
                    deck.playlist.rewind();
                }
            }
            EngineCommand::SkipBackward => {
                if deck.engine().is_some_and(|engine| engine.has_previous()) {
                    deck.run("seek_previous", |engine| engine.seek_previous());
                    deck.playlist.retreat();
                }
            }
        }
    }
}

/// Callback fired when a plan reaches it
///
/// Invoked while the deck is locked.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// One stage of a [`FadePlan`]
pub enum FadeStep {
    /// Ramp from the current engine volume to `target`
    Ramp {
        /// Target volume
        target: f32,
        /// Ramp duration
        duration: Duration,
    },

    /// Issue an engine command
    Engine(EngineCommand),

    /// Invoke a callback
    Notify(Completion),
}

impl fmt::Debug for FadeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FadeStep::Ramp { target, duration } => f
                .debug_struct("Ramp")
                .field("target", target)
                .field("duration", duration)
                .finish(),
            FadeStep::Engine(command) => f.debug_tuple("Engine").field(command).finish(),
            FadeStep::Notify(_) => f.write_str("Notify"),
        }
    }
}

/// Sequence of ramps and commands executed as one cancellable transition
///
/// ```rust
/// use soundbed_playback::{EngineCommand, FadePlan};
/// use std::time::Duration;
///
/// // Fade out, move to the next track, fade back in
/// let plan = FadePlan::new()
///     .ramp(0.0, Duration::from_millis(300))
///     .then(EngineCommand::SkipForward)
///     .ramp(0.8, Duration::from_millis(500));
/// assert_eq!(plan.len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct FadePlan {
    steps: Vec<FadeStep>,
}

impl FadePlan {
    /// Create an empty plan
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a volume ramp
    pub fn ramp(mut self, target: f32, duration: Duration) -> Self {
        self.steps.push(FadeStep::Ramp { target, duration });
        self
    }

    /// Append an engine command
    pub fn then(mut self, command: EngineCommand) -> Self {
        self.steps.push(FadeStep::Engine(command));
        self
    }

    /// Append a callback
    pub fn notify(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.steps.push(FadeStep::Notify(Box::new(callback)));
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if plan has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Schedules fades against a [`SharedDeck`]
///
/// At most one plan runs at a time; starting another cancels it.
pub struct VolumeFader {
    deck: SharedDeck,
    runtime: Handle,
    active: Option<JoinHandle<()>>,
}

impl VolumeFader {
    /// Create a fader that spawns its tasks on `runtime`
    pub fn new(deck: SharedDeck, runtime: Handle) -> Self {
        Self {
            deck,
            runtime,
            active: None,
        }
    }

    /// Ramp the volume to `target` over `duration`
    ///
    /// Returns immediately. `on_complete` runs after the last step unless the
    /// fade is cancelled first. A zero duration sets the target and runs
    /// `on_complete` before returning.
    ///
    /// A scheduled `on_complete` runs on the fade task with the deck locked;
    /// it must not call back into the fader or the controller.
    pub fn animate(&mut self, target: f32, duration: Duration, on_complete: Option<Completion>) {
        if FadeJob::new(0.0, target, duration).is_immediate() {
            self.cancel();
            self.deck.lock().write_volume(target);
            if let Some(callback) = on_complete {
                callback();
            }
            return;
        }

        let mut plan = FadePlan::new().ramp(target, duration);
        if let Some(callback) = on_complete {
            plan.steps.push(FadeStep::Notify(callback));
        }
        self.run(plan);
    }

    /// Cancel the running plan and start `plan`
    pub fn run(&mut self, plan: FadePlan) {
        self.abort_task();
        let epoch = self.deck.lock().next_epoch();

        tracing::debug!("Starting fade plan {}: {:?}", epoch, plan.steps);
        self.active = Some(
            self.runtime
                .spawn(run_plan(self.deck.clone(), epoch, plan.steps)),
        );
    }

    /// Stop the running plan where it is
    ///
    /// Volume stays at whatever the last completed step wrote.
    pub fn cancel(&mut self) {
        let epoch = self.deck.lock().next_epoch();
        if self.abort_task() {
            tracing::debug!("Cancelled fade (epoch now {})", epoch);
        }
    }

    /// Whether a plan is still running
    pub fn is_active(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn abort_task(&mut self) -> bool {
        match self.active.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for VolumeFader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeFader")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Drop for VolumeFader {
    fn drop(&mut self) {
        self.abort_task();
    }
}

/// Outcome of one guarded step
enum Step {
    Continue,
    Cancelled,
}

/// Run `f` on the deck if `epoch` is still current
fn guarded(deck: &SharedDeck, epoch: u64, f: impl FnOnce(&mut Deck)) -> Step {
    let mut deck = deck.lock();
    if !deck.is_current(epoch) {
        return Step::Cancelled;
    }
    f(&mut deck);
    Step::Continue
}

async fn run_plan(deck: SharedDeck, epoch: u64, steps: Vec<FadeStep>) {
    for step in steps {
        let outcome = match step {
            FadeStep::Ramp { target, duration } => ramp(&deck, epoch, target, duration).await,
            FadeStep::Engine(command) => guarded(&deck, epoch, |deck| command.apply(deck)),
            // Runs under the deck lock so a concurrent cancel either sees it
            // done or prevents it
            FadeStep::Notify(callback) => guarded(&deck, epoch, |_| callback()),
        };

        if let Step::Cancelled = outcome {
            tracing::trace!("Fade plan {} superseded", epoch);
            return;
        }
    }
    tracing::trace!("Fade plan {} finished", epoch);
}

async fn ramp(deck: &SharedDeck, epoch: u64, target: f32, duration: Duration) -> Step {
    let job = {
        let deck = deck.lock();
        if !deck.is_current(epoch) {
            return Step::Cancelled;
        }
        FadeJob::new(deck.volume(), target, duration)
    };

    if job.is_immediate() {
        return guarded(deck, epoch, |deck| deck.write_volume(target));
    }

    let period = job.interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    for step in 1..=job.step_count {
        ticker.tick().await;
        let volume = job.volume_at(step);
        if let Step::Cancelled = guarded(deck, epoch, |deck| deck.write_volume(volume)) {
            return Step::Cancelled;
        }
    }

    Step::Continue
}

//! Volume fader tests
//!
//! Drive the fader directly against a deck, without the controller.

mod common;

use common::*;
use soundbed_core::AudioEngine;
use soundbed_playback::{EngineCommand, FadePlan, VolumeFader};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

fn fader_for(engine: &RecordingEngine) -> VolumeFader {
    VolumeFader::new(deck_with(engine), Handle::current())
}

fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = count.clone();
    (count, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn ramp_writes_twenty_steps_for_any_duration() {
    for ms in [100u64, 300, 500, 1000] {
        let engine = RecordingEngine::new();
        let mut fader = fader_for(&engine);

        fader.animate(1.0, Duration::from_millis(ms), None);
        advance(ms + 50).await;

        let writes = engine.volume_writes();
        assert_eq!(writes.len(), 20, "duration {}ms", ms);
        assert_eq!(*writes.last().unwrap(), 1.0);
    }
}

#[tokio::test(start_paused = true)]
async fn ramp_starts_from_current_volume() {
    let mut engine = RecordingEngine::new();
    engine.set_volume(0.6).unwrap();
    engine.clear_calls();
    let mut fader = fader_for(&engine);

    fader.animate(0.2, Duration::from_millis(400), None);
    advance(450).await;

    let writes = engine.volume_writes();
    assert!(approx(writes[0], 0.58));
    assert!(approx(writes[9], 0.4));
    assert_eq!(writes[19], 0.2);
}

#[tokio::test(start_paused = true)]
async fn completion_runs_after_last_step() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);
    let (count, callback) = counter();

    fader.animate(0.5, Duration::from_millis(200), Some(Box::new(callback)));

    advance(150).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance(100).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!fader.is_active());
}

#[tokio::test(start_paused = true)]
async fn zero_duration_applies_synchronously() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);
    let (count, callback) = counter();

    fader.animate(0.7, Duration::ZERO, Some(Box::new(callback)));

    // No clock advance needed
    assert_eq!(engine.volume_writes(), vec![0.7]);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!fader.is_active());
}

#[tokio::test(start_paused = true)]
async fn zero_duration_cancels_running_fade() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);
    let (count, callback) = counter();

    fader.animate(1.0, Duration::from_millis(500), Some(Box::new(callback)));
    advance(100).await;
    fader.animate(0.3, Duration::ZERO, None);
    advance(1000).await;

    assert_eq!(engine.current_volume(), 0.3);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn newer_fade_supersedes_older() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);
    let (first_done, first) = counter();
    let (second_done, second) = counter();

    fader.animate(1.0, Duration::from_millis(500), Some(Box::new(first)));
    advance(100).await;
    let before_second = engine.volume_writes().len();

    fader.animate(0.0, Duration::from_millis(200), Some(Box::new(second)));
    advance(1000).await;

    // Exactly one more ramp of writes, all from the second fade
    let writes = engine.volume_writes();
    assert_eq!(writes.len(), before_second + 20);
    assert!(writes[before_second..].windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(engine.current_volume(), 0.0);
    assert_eq!(first_done.load(Ordering::SeqCst), 0);
    assert_eq!(second_done.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_leaves_volume_mid_ramp() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);
    let (count, callback) = counter();

    fader.animate(1.0, Duration::from_millis(500), Some(Box::new(callback)));
    advance(260).await;
    fader.cancel();
    let frozen = engine.current_volume();

    advance(1000).await;

    assert!(frozen > 0.0 && frozen < 1.0);
    assert_eq!(engine.current_volume(), frozen);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!fader.is_active());
}

#[tokio::test(start_paused = true)]
async fn cancel_without_fade_is_noop() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);

    fader.cancel();
    fader.cancel();

    assert!(engine.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn plan_runs_command_between_ramps() {
    let mut engine = RecordingEngine::new();
    engine.set_queue_len(3);
    engine.set_volume(0.5).unwrap();
    engine.clear_calls();
    let mut fader = fader_for(&engine);

    fader.run(
        FadePlan::new()
            .ramp(0.0, Duration::from_millis(100))
            .then(EngineCommand::SkipForward)
            .ramp(0.5, Duration::from_millis(100)),
    );
    advance(300).await;

    let calls = engine.calls();
    assert_eq!(calls.len(), 41);
    assert_eq!(calls[19], Call::SetVolume(0.0));
    assert_eq!(calls[20], Call::SeekNext);
    assert_eq!(calls[40], Call::SetVolume(0.5));
    assert_eq!(engine.position(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_plan_skips_pending_command() {
    let mut engine = RecordingEngine::new();
    engine.set_queue_len(3);
    engine.set_volume(0.5).unwrap();
    engine.clear_calls();
    let mut fader = fader_for(&engine);

    fader.run(
        FadePlan::new()
            .ramp(0.0, Duration::from_millis(500))
            .then(EngineCommand::Pause),
    );
    advance(200).await;
    fader.cancel();
    advance(1000).await;

    assert_eq!(engine.count(&Call::Pause), 0);
}

#[tokio::test(start_paused = true)]
async fn skip_backward_at_start_issues_nothing() {
    let engine = RecordingEngine::new();
    engine.set_queue_len(2);
    let mut fader = fader_for(&engine);

    fader.run(FadePlan::new().then(EngineCommand::SkipBackward));
    advance(10).await;

    assert!(engine.calls().is_empty());
    assert_eq!(engine.position(), 0);
}

#[tokio::test(start_paused = true)]
async fn skip_forward_at_end_seeks_to_start() {
    let engine = RecordingEngine::new();
    engine.set_queue_len(2);
    engine.set_position(1);
    let mut fader = fader_for(&engine);

    fader.run(FadePlan::new().then(EngineCommand::SkipForward));
    advance(10).await;

    assert_eq!(engine.calls(), vec![Call::SeekToStart]);
    assert_eq!(engine.position(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_fader_stops_its_task() {
    let engine = RecordingEngine::new();
    let mut fader = fader_for(&engine);

    fader.animate(1.0, Duration::from_millis(500), None);
    advance(100).await;
    drop(fader);
    let writes = engine.volume_writes().len();
    advance(1000).await;

    assert_eq!(engine.volume_writes().len(), writes);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancel_racing_completion_never_fires_late() {
    for attempt in 0..60u64 {
        let engine = RecordingEngine::new();
        let mut fader = fader_for(&engine);
        let (count, callback) = counter();

        fader.animate(1.0, Duration::from_millis(20), Some(Box::new(callback)));
        tokio::time::sleep(Duration::from_millis(attempt % 24)).await;
        fader.cancel();
        let seen = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen, "attempt {}", attempt);
    }
}

//! Queue runner tests
//!
//! Run on a paused tokio clock, so ten-second tracks finish instantly.

use jukebox_core::{error::Result, PlaybackEngine};
use jukebox_playback::{run_queue, ClockEngine, PauseFlag, QueueOutcome, QueueTrack, RepeatMode};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const TRACK_LEN: Duration = Duration::from_secs(10);
const POLL: Duration = Duration::from_secs(1);

// ===== Test Helpers =====

/// Clock engine that remembers every path it was asked to load
struct RecordingEngine {
    inner: ClockEngine,
    loads: Mutex<Vec<PathBuf>>,
}

impl RecordingEngine {
    fn new() -> Self {
        Self {
            inner: ClockEngine::new(TRACK_LEN, 1.0),
            loads: Mutex::new(Vec::new()),
        }
    }

    fn loads(&self) -> Vec<PathBuf> {
        self.loads.lock().unwrap().clone()
    }
}

impl PlaybackEngine for RecordingEngine {
    fn load(&self, path: &Path) -> Result<()> {
        self.loads.lock().unwrap().push(path.to_path_buf());
        self.inner.load(path)
    }

    fn play(&self) -> Result<()> {
        self.inner.play()
    }

    fn pause(&self) {
        self.inner.pause();
    }

    fn resume(&self) {
        self.inner.resume();
    }

    fn stop(&self) {
        self.inner.stop();
    }

    fn set_volume(&self, volume: f32) -> Result<()> {
        self.inner.set_volume(volume)
    }

    fn volume(&self) -> f32 {
        self.inner.volume()
    }

    fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }
}

/// Create `n` empty track files; they play for the fallback duration
fn track_files(dir: &TempDir, n: usize) -> Vec<QueueTrack> {
    (1..=n)
        .map(|i| {
            let path = dir.path().join(format!("track{i}.mp3"));
            std::fs::write(&path, b"").unwrap();
            QueueTrack::new(format!("Track {i}"), path)
        })
        .collect()
}

// ===== Tests =====

#[tokio::test(start_paused = true)]
async fn plays_queue_once_in_order() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 3);
    let expected: Vec<PathBuf> = queue.iter().map(|t| t.path.clone()).collect();
    let engine = Arc::new(RecordingEngine::new());

    let start = Instant::now();
    let outcome = run_queue(
        engine.clone(),
        queue,
        RepeatMode::Off,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    )
    .await;

    assert_eq!(outcome, QueueOutcome::Finished);
    assert_eq!(engine.loads(), expected);
    assert!(!engine.is_busy());

    // Three tracks, each noticed within one poll of ending
    let elapsed = start.elapsed();
    assert!(elapsed >= TRACK_LEN * 3);
    assert!(elapsed <= (TRACK_LEN + POLL) * 3);
}

#[tokio::test(start_paused = true)]
async fn empty_queue_finishes_immediately() {
    let engine = Arc::new(RecordingEngine::new());

    let outcome = run_queue(
        engine.clone(),
        Vec::new(),
        RepeatMode::All,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    )
    .await;

    assert_eq!(outcome, QueueOutcome::Finished);
    assert!(engine.loads().is_empty());
}

#[tokio::test(start_paused = true)]
async fn missing_track_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut queue = vec![QueueTrack::new("Ghost", dir.path().join("ghost.mp3"))];
    queue.extend(track_files(&dir, 1));
    let engine = Arc::new(RecordingEngine::new());

    let start = Instant::now();
    let outcome = run_queue(
        engine.clone(),
        queue,
        RepeatMode::Off,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    )
    .await;

    assert_eq!(outcome, QueueOutcome::Finished);
    assert_eq!(engine.loads().len(), 2);
    assert!(start.elapsed() >= TRACK_LEN);
}

#[tokio::test(start_paused = true)]
async fn loop_runs_until_cancelled() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 2);
    let first = queue[0].path.clone();
    let engine = Arc::new(RecordingEngine::new());
    let token = CancellationToken::new();

    let job = tokio::spawn(run_queue(
        engine.clone(),
        queue,
        RepeatMode::All,
        token.clone(),
        PauseFlag::new(),
        POLL,
    ));

    // Long enough to wrap around to the first track again
    tokio::time::sleep(TRACK_LEN * 2 + Duration::from_secs(5)).await;
    assert!(engine.is_busy());

    token.cancel();
    let outcome = job.await.unwrap();

    assert_eq!(outcome, QueueOutcome::Cancelled);
    assert!(!engine.is_busy());

    let loads = engine.loads();
    assert!(loads.len() >= 3);
    assert_eq!(loads[2], first);
}

#[tokio::test(start_paused = true)]
async fn repeat_one_replays_first_track() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 2);
    let first = queue[0].path.clone();
    let engine = Arc::new(RecordingEngine::new());
    let token = CancellationToken::new();

    let job = tokio::spawn(run_queue(
        engine.clone(),
        queue,
        RepeatMode::One,
        token.clone(),
        PauseFlag::new(),
        POLL,
    ));

    tokio::time::sleep(TRACK_LEN * 3 + Duration::from_secs(5)).await;
    token.cancel();
    job.await.unwrap();

    let loads = engine.loads();
    assert!(loads.len() >= 3);
    assert!(loads.iter().all(|p| *p == first));
}

#[tokio::test(start_paused = true)]
async fn loop_of_unplayable_tracks_ends() {
    let dir = TempDir::new().unwrap();
    let queue = vec![
        QueueTrack::new("Ghost 1", dir.path().join("a.mp3")),
        QueueTrack::new("Ghost 2", dir.path().join("b.mp3")),
    ];
    let engine = Arc::new(RecordingEngine::new());

    let outcome = run_queue(
        engine.clone(),
        queue,
        RepeatMode::All,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    )
    .await;

    assert_eq!(outcome, QueueOutcome::Finished);
    assert_eq!(engine.loads().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn paused_track_keeps_job_alive() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 1);
    let engine = Arc::new(RecordingEngine::new());

    let job = tokio::spawn(run_queue(
        engine.clone(),
        queue,
        RepeatMode::Off,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    ));

    tokio::time::sleep(Duration::from_secs(3)).await;
    engine.pause();

    tokio::time::sleep(TRACK_LEN * 5).await;
    assert!(!job.is_finished());

    engine.resume();
    let outcome = job.await.unwrap();
    assert_eq!(outcome, QueueOutcome::Finished);
}

#[tokio::test(start_paused = true)]
async fn pre_cancelled_token_plays_nothing() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 2);
    let engine = Arc::new(RecordingEngine::new());
    let token = CancellationToken::new();
    token.cancel();

    let outcome = run_queue(engine.clone(), queue, RepeatMode::Off, token, PauseFlag::new(), POLL).await;

    assert_eq!(outcome, QueueOutcome::Cancelled);
    assert!(engine.loads().is_empty());
}

/// Clock engine that records which thread each load ran on
struct ThreadEngine {
    inner: ClockEngine,
    load_threads: Mutex<Vec<std::thread::ThreadId>>,
}

impl PlaybackEngine for ThreadEngine {
    fn load(&self, path: &Path) -> Result<()> {
        self.load_threads.lock().unwrap().push(std::thread::current().id());
        self.inner.load(path)
    }

    fn play(&self) -> Result<()> {
        self.inner.play()
    }

    fn pause(&self) {
        self.inner.pause();
    }

    fn resume(&self) {
        self.inner.resume();
    }

    fn stop(&self) {
        self.inner.stop();
    }

    fn set_volume(&self, volume: f32) -> Result<()> {
        self.inner.set_volume(volume)
    }

    fn volume(&self) -> f32 {
        self.inner.volume()
    }

    fn is_busy(&self) -> bool {
        self.inner.is_busy()
    }
}

#[tokio::test(start_paused = true)]
async fn track_loading_runs_off_the_runtime_thread() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 2);
    let engine = Arc::new(ThreadEngine {
        inner: ClockEngine::new(TRACK_LEN, 1.0),
        load_threads: Mutex::new(Vec::new()),
    });

    let outcome = run_queue(
        engine.clone(),
        queue,
        RepeatMode::Off,
        CancellationToken::new(),
        PauseFlag::new(),
        POLL,
    )
    .await;

    assert_eq!(outcome, QueueOutcome::Finished);
    let runtime_thread = std::thread::current().id();
    let threads = engine.load_threads.lock().unwrap().clone();
    assert_eq!(threads.len(), 2);
    assert!(threads.iter().all(|id| *id != runtime_thread));
}

#[tokio::test(start_paused = true)]
async fn pause_set_before_track_starts_is_applied() {
    let dir = TempDir::new().unwrap();
    let queue = track_files(&dir, 1);
    let engine = Arc::new(RecordingEngine::new());
    let pause = PauseFlag::new();
    pause.set();

    let job = tokio::spawn(run_queue(
        engine.clone(),
        queue,
        RepeatMode::Off,
        CancellationToken::new(),
        pause.clone(),
        POLL,
    ));

    tokio::time::sleep(TRACK_LEN * 3).await;
    assert_eq!(engine.loads().len(), 1);
    assert!(engine.is_busy());
    assert!(!job.is_finished());

    pause.clear();
    engine.resume();
    assert_eq!(job.await.unwrap(), QueueOutcome::Finished);
}

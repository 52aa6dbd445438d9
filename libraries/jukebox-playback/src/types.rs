//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Track information handed to the queue runner
///
/// Snapshotted from storage when playback starts so the runner never
/// touches the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueTrack {
    /// Track title (for logging)
    pub title: String,

    /// File path for the engine
    pub path: PathBuf,
}

impl QueueTrack {
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// Playback state as seen by clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing playing
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when queue ends
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

/// How a queue run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOutcome {
    /// Every track played (or was skipped) and repeat is off
    Finished,

    /// The cancellation token fired
    Cancelled,
}

/// Pause request shared between a queue run and whoever controls it
///
/// Set it before pausing the engine; the runner re-applies it to every
/// track it starts, so a pause that lands while a track is still loading
/// is not lost.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Configuration for the playback side of the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// How often the runner checks whether the engine is still busy (default: 1s)
    pub poll_interval: Duration,

    /// Track length assumed when a file's duration can't be probed (default: 180s)
    pub fallback_duration: Duration,

    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            fallback_duration: Duration::from_secs(180),
            volume: 1.0,
        }
    }
}

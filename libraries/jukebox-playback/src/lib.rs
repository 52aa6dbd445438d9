//! Jukebox - Playback
//!
//! Playback side of the Jukebox server.
//!
//! This crate provides:
//! - [`ClockEngine`], a [`PlaybackEngine`](jukebox_core::PlaybackEngine)
//!   that plays tracks against their probed duration. It produces no
//!   sound; an output engine would implement the same trait
//! - [`Volume`] level (linear, 0.0-1.0)
//! - [`probe_duration`] for reading track length with symphonia
//! - [`run_queue`], the cancellable background job behind `play` and the
//!   loop commands
//!
//! # Example
//!
//! ```rust,no_run
//! use jukebox_playback::{run_queue, ClockEngine, PauseFlag, QueueTrack, RepeatMode};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() {
//! let engine = Arc::new(ClockEngine::default());
//! let token = CancellationToken::new();
//! let queue = vec![QueueTrack::new("Intro", "/music/intro.mp3")];
//!
//! let job = tokio::spawn(run_queue(
//!     engine,
//!     queue,
//!     RepeatMode::All,
//!     token.clone(),
//!     PauseFlag::new(),
//!     Duration::from_secs(1),
//! ));
//!
//! // Later: `stop`
//! token.cancel();
//! let _ = job.await;
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod probe;
pub mod runner;
pub mod types;
pub mod volume;

pub use clock::ClockEngine;
pub use error::{PlaybackError, Result};
pub use probe::probe_duration;
pub use runner::run_queue;
pub use types::{PauseFlag, PlaybackConfig, PlaybackState, QueueOutcome, QueueTrack, RepeatMode};
pub use volume::Volume;

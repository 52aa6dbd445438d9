//! Background queue runner
//!
//! Walks a snapshot of tracks through a [`PlaybackEngine`] until the queue
//! ends or the job's cancellation token fires.

use crate::types::{PauseFlag, QueueOutcome, QueueTrack, RepeatMode};
use jukebox_core::PlaybackEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Play `queue` through `engine`
///
/// - `RepeatMode::Off` plays every track once.
/// - `RepeatMode::All` starts over at the first track after the last one.
/// - `RepeatMode::One` replays the first track.
///
/// Each track that starts while `pause` is set is paused straight away.
/// A track that fails to load or start is logged and skipped. If a whole
/// pass in a repeat mode plays nothing, the run ends as `Finished` instead
/// of spinning. The engine is stopped before returning.
pub async fn run_queue(
    engine: Arc<dyn PlaybackEngine>,
    queue: Vec<QueueTrack>,
    repeat: RepeatMode,
    token: CancellationToken,
    pause: PauseFlag,
    poll_interval: Duration,
) -> QueueOutcome {
    let mut ticker = tokio::time::interval(poll_interval.max(MIN_POLL_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let pass: &[QueueTrack] = match repeat {
        RepeatMode::One => &queue[..queue.len().min(1)],
        RepeatMode::Off | RepeatMode::All => &queue,
    };

    let outcome = loop {
        let mut played = 0usize;

        for track in pass {
            if token.is_cancelled() {
                engine.stop();
                return QueueOutcome::Cancelled;
            }

            if !start_track(&engine, track).await {
                continue;
            }
            if token.is_cancelled() {
                engine.stop();
                return QueueOutcome::Cancelled;
            }
            played += 1;
            if pause.is_set() {
                engine.pause();
            }

            if wait_for_track(engine.as_ref(), &token, &mut ticker).await
                == QueueOutcome::Cancelled
            {
                engine.stop();
                return QueueOutcome::Cancelled;
            }
        }

        if repeat == RepeatMode::Off {
            break QueueOutcome::Finished;
        }
        if played == 0 {
            tracing::warn!(tracks = pass.len(), "No track in the loop could be played, ending loop");
            break QueueOutcome::Finished;
        }
    };

    engine.stop();
    outcome
}

/// Load and start one track
///
/// Loading opens and probes the file, so it runs on the blocking pool.
async fn start_track(engine: &Arc<dyn PlaybackEngine>, track: &QueueTrack) -> bool {
    let loader = Arc::clone(engine);
    let path = track.path.clone();
    let loaded = match tokio::task::spawn_blocking(move || loader.load(&path)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(title = %track.title, error = %e, "Track load task failed");
            return false;
        }
    };

    if let Err(e) = loaded {
        tracing::warn!(title = %track.title, path = %track.path.display(), error = %e, "Skipping track");
        return false;
    }

    if let Err(e) = engine.play() {
        tracing::warn!(title = %track.title, error = %e, "Failed to start track");
        return false;
    }

    tracing::info!(title = %track.title, "Now playing");
    true
}

/// Block until the engine goes idle (`Finished`) or the token fires
async fn wait_for_track(
    engine: &dyn PlaybackEngine,
    token: &CancellationToken,
    ticker: &mut tokio::time::Interval,
) -> QueueOutcome {
    loop {
        tokio::select! {
            biased;
            () = token.cancelled() => return QueueOutcome::Cancelled,
            _ = ticker.tick() => {
                if !engine.is_busy() {
                    return QueueOutcome::Finished;
                }
            }
        }
    }
}

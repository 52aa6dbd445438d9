//! Process-wide session shared by every connection
//!
//! Holds the selected playlist, the memento stack and the running
//! playback job. It lives behind one `tokio::sync::Mutex` in
//! [`AppState`](crate::state::AppState); a command holds the lock for its
//! whole execution.

use crate::memento::MementoStack;
use jukebox_core::{PlaybackEngine, PlaylistId};
use jukebox_playback::{run_queue, PauseFlag, PlaybackState, QueueOutcome, QueueTrack, RepeatMode};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Background task walking a queue through the engine
struct PlaybackJob {
    token: CancellationToken,
    handle: JoinHandle<QueueOutcome>,
    pause: PauseFlag,
}

impl PlaybackJob {
    fn is_over(&self) -> bool {
        self.token.is_cancelled() || self.handle.is_finished()
    }
}

pub struct Session {
    current_playlist_id: Option<PlaylistId>,
    mementos: MementoStack,
    // Kept after cancellation so the next job can wait for it to exit
    job: Option<PlaybackJob>,
}

impl Session {
    pub fn new(memento_cap: Option<usize>) -> Self {
        Self {
            current_playlist_id: None,
            mementos: MementoStack::new(memento_cap),
            job: None,
        }
    }

    pub fn current_playlist_id(&self) -> Option<PlaylistId> {
        self.current_playlist_id
    }

    pub fn select_playlist(&mut self, id: PlaylistId) {
        self.current_playlist_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.current_playlist_id = None;
    }

    pub fn mementos(&self) -> &MementoStack {
        &self.mementos
    }

    pub fn mementos_mut(&mut self) -> &mut MementoStack {
        &mut self.mementos
    }

    /// Current play state
    ///
    /// A job that ran out of tracks reads as `Idle`.
    pub fn play_state(&self) -> PlaybackState {
        match &self.job {
            Some(job) if !job.is_over() => {
                if job.pause.is_set() {
                    PlaybackState::Paused
                } else {
                    PlaybackState::Playing
                }
            }
            _ => PlaybackState::Idle,
        }
    }

    /// Start a playback job, cancelling the running one
    ///
    /// The new task waits for the previous one to exit before it touches
    /// the engine.
    pub fn start_playback(
        &mut self,
        engine: Arc<dyn PlaybackEngine>,
        queue: Vec<QueueTrack>,
        repeat: RepeatMode,
        poll_interval: Duration,
    ) {
        let previous = self.job.take().map(|job| {
            job.token.cancel();
            job.handle
        });

        let token = CancellationToken::new();
        let job_token = token.clone();
        let pause = PauseFlag::new();
        let job_pause = pause.clone();
        let tracks = queue.len();

        let handle = tokio::spawn(async move {
            if let Some(previous) = previous {
                if let Err(e) = previous.await {
                    tracing::warn!(error = %e, "Previous playback job did not exit cleanly");
                }
            }

            let outcome = run_queue(engine, queue, repeat, job_token, job_pause, poll_interval).await;
            tracing::info!(?outcome, "Playback job ended");
            outcome
        });

        tracing::info!(tracks, ?repeat, "Playback job started");

        self.job = Some(PlaybackJob {
            token,
            handle,
            pause,
        });
    }

    /// Pause the running job; false if nothing is playing
    pub fn pause(&mut self, engine: &dyn PlaybackEngine) -> bool {
        if self.play_state() != PlaybackState::Playing {
            return false;
        }

        if let Some(job) = &self.job {
            job.pause.set();
        }
        engine.pause();
        true
    }

    /// Resume a paused job; false if nothing is paused
    pub fn resume(&mut self, engine: &dyn PlaybackEngine) -> bool {
        if self.play_state() != PlaybackState::Paused {
            return false;
        }

        if let Some(job) = &self.job {
            job.pause.clear();
        }
        engine.resume();
        true
    }

    /// Cancel the running job and silence the engine
    pub fn stop(&mut self, engine: &dyn PlaybackEngine) {
        if let Some(job) = &self.job {
            if !job.is_over() {
                tracing::info!("Stopping playback job");
            }
            job.token.cancel();
        }

        engine.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_playback::ClockEngine;

    fn engine() -> Arc<ClockEngine> {
        Arc::new(ClockEngine::new(Duration::from_secs(10), 1.0))
    }

    fn queue(dir: &tempfile::TempDir, n: usize) -> Vec<QueueTrack> {
        (1..=n)
            .map(|i| {
                let path = dir.path().join(format!("{i}.mp3"));
                std::fs::write(&path, b"").unwrap();
                QueueTrack::new(format!("Track {i}"), path)
            })
            .collect()
    }

    #[test]
    fn starts_idle_without_selection() {
        let session = Session::new(None);

        assert_eq!(session.play_state(), PlaybackState::Idle);
        assert_eq!(session.current_playlist_id(), None);
        assert!(session.mementos().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_resume_stop() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        let mut session = Session::new(None);

        assert!(!session.pause(engine.as_ref()));

        session.start_playback(
            engine.clone(),
            queue(&dir, 1),
            RepeatMode::Off,
            Duration::from_secs(1),
        );
        assert_eq!(session.play_state(), PlaybackState::Playing);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(session.pause(engine.as_ref()));
        assert_eq!(session.play_state(), PlaybackState::Paused);
        assert!(!session.pause(engine.as_ref()));

        assert!(session.resume(engine.as_ref()));
        assert_eq!(session.play_state(), PlaybackState::Playing);
        assert!(!session.resume(engine.as_ref()));

        session.stop(engine.as_ref());
        assert_eq!(session.play_state(), PlaybackState::Idle);
        assert!(!engine.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn finished_job_reads_idle() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        let mut session = Session::new(None);

        session.start_playback(
            engine.clone(),
            queue(&dir, 2),
            RepeatMode::Off,
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(session.play_state(), PlaybackState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn new_job_replaces_running_loop() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        let mut session = Session::new(None);

        session.start_playback(
            engine.clone(),
            queue(&dir, 2),
            RepeatMode::All,
            Duration::from_secs(1),
        );
        tokio::time::sleep(Duration::from_secs(3)).await;

        session.start_playback(
            engine.clone(),
            queue(&dir, 1),
            RepeatMode::Off,
            Duration::from_secs(1),
        );
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(session.play_state(), PlaybackState::Playing);
        assert!(engine.is_busy());

        // The single track ends; the replaced loop must not keep playing
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(session.play_state(), PlaybackState::Idle);
        assert!(!engine.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_before_track_starts_holds_the_track() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        let mut session = Session::new(None);

        session.start_playback(
            engine.clone(),
            queue(&dir, 1),
            RepeatMode::Off,
            Duration::from_secs(1),
        );
        // The job has not loaded its track yet
        assert!(session.pause(engine.as_ref()));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(session.play_state(), PlaybackState::Paused);
        assert!(engine.is_busy());

        assert!(session.resume(engine.as_ref()));
        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(session.play_state(), PlaybackState::Idle);
    }
}

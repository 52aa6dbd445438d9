//! Common test utilities and fixtures
#![allow(dead_code)]
use jukebox_core::{PlaybackEngine, TrackStore};
use jukebox_playback::{ClockEngine, PlaybackState};
use jukebox_server::{AppState, Dispatcher};
use jukebox_storage::LocalTrackStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Tracks used in tests are empty files, so they play for this long
pub const LONG_TRACK: Duration = Duration::from_secs(600);

pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Server state over a temporary database
pub struct TestApp {
    pub state: AppState,
    pub dispatcher: Dispatcher,
    pub store: LocalTrackStore,
    pub engine: Arc<ClockEngine>,
    dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_track_length(LONG_TRACK).await
    }

    pub async fn with_track_length(track_length: Duration) -> Self {
        Self::build(track_length, None).await
    }

    pub async fn with_memento_cap(cap: usize) -> Self {
        Self::build(LONG_TRACK, Some(cap)).await
    }

    async fn build(track_length: Duration, memento_cap: Option<usize>) -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("jukebox.db");
        let pool = jukebox_storage::connect(&format!("sqlite://{}", db_path.display()))
            .await
            .unwrap();

        let store = LocalTrackStore::new(pool);
        let engine = Arc::new(ClockEngine::new(track_length, 1.0));
        let state = AppState::new(
            Arc::new(store.clone()),
            engine.clone(),
            POLL_INTERVAL,
            memento_cap,
        );

        Self {
            dispatcher: Dispatcher::new(state.clone()),
            state,
            store,
            engine,
            dir,
        }
    }

    /// Dispatch one line; blank lines reply with an empty string
    pub async fn send(&self, line: &str) -> String {
        self.dispatcher.dispatch(line).await.unwrap_or_default()
    }

    /// Create an (empty) audio file and return its path
    pub fn track_file(&self, name: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, b"").unwrap();
        path.display().to_string()
    }

    /// Add a track backed by a real file
    pub async fn add_track(&self, playlist: &str, title: &str) -> String {
        let path = self.track_file(&format!("{}.mp3", title.replace(' ', "_")));
        self.send(&format!(
            r#"add_track_to_playlist "{playlist}" "{title}" "{path}""#
        ))
        .await
    }

    pub async fn play_state(&self) -> PlaybackState {
        self.state.session.lock().await.play_state()
    }

    pub async fn selected(&self) -> Option<i64> {
        self.state.session.lock().await.current_playlist_id()
    }

    /// `(position, title)` of a playlist, in order
    pub async fn order(&self, playlist: &str) -> Vec<(i64, String)> {
        let playlist = self
            .store
            .find_playlist_by_name(playlist)
            .await
            .unwrap()
            .unwrap();
        self.store
            .get_tracks(playlist.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.position, t.title))
            .collect()
    }

    pub fn volume(&self) -> f32 {
        self.engine.volume()
    }
}

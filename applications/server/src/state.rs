/// Shared application state
use crate::session::Session;
use jukebox_core::{PlaybackEngine, TrackStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Application state shared across all connections
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub store: Arc<dyn TrackStore>,
    pub engine: Arc<dyn PlaybackEngine>,
    pub poll_interval: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TrackStore>,
        engine: Arc<dyn PlaybackEngine>,
        poll_interval: Duration,
        memento_cap: Option<usize>,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(memento_cap))),
            store,
            engine,
            poll_interval,
        }
    }
}

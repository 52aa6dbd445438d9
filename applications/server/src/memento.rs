//! Undo snapshots of playlists

use jukebox_core::{PlaylistId, TrackEntry};
use std::collections::VecDeque;

/// Ordered copy of a playlist's tracks at the time it was saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMemento {
    playlist_id: PlaylistId,
    entries: Vec<TrackEntry>,
}

impl PlaylistMemento {
    pub fn new(playlist_id: PlaylistId, entries: Vec<TrackEntry>) -> Self {
        Self {
            playlist_id,
            entries,
        }
    }

    pub fn playlist_id(&self) -> PlaylistId {
        self.playlist_id
    }

    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }
}

/// LIFO stack of mementos
///
/// With a cap, pushing onto a full stack drops the oldest memento.
#[derive(Debug, Default)]
pub struct MementoStack {
    mementos: VecDeque<PlaylistMemento>,
    cap: Option<usize>,
}

impl MementoStack {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            mementos: VecDeque::new(),
            cap,
        }
    }

    pub fn push(&mut self, memento: PlaylistMemento) {
        if let Some(cap) = self.cap {
            if cap == 0 {
                return;
            }
            while self.mementos.len() >= cap {
                if let Some(dropped) = self.mementos.pop_front() {
                    tracing::debug!(
                        playlist_id = dropped.playlist_id,
                        "Memento stack full, dropping oldest snapshot"
                    );
                }
            }
        }

        self.mementos.push_back(memento);
    }

    pub fn pop(&mut self) -> Option<PlaylistMemento> {
        self.mementos.pop_back()
    }

    pub fn len(&self) -> usize {
        self.mementos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mementos.is_empty()
    }
}

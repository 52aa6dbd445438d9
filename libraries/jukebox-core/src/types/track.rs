/// Track domain types
use super::ids::{PlaylistId, TrackId};
use serde::{Deserialize, Serialize};

/// A track stored in exactly one playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Store-assigned identifier
    pub id: TrackId,

    /// Owning playlist
    pub playlist_id: PlaylistId,

    /// Track title (unique within its playlist)
    pub title: String,

    /// Locator handed to the playback engine (usually a file path)
    pub path: String,

    /// 1-based position within the playlist
    pub position: i64,
}

impl Track {
    /// Detach the `(title, path)` pair from the stored row
    pub fn entry(&self) -> TrackEntry {
        TrackEntry::new(self.title.clone(), self.path.clone())
    }
}

/// `(title, path)` pair used for snapshots and bulk re-insertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackEntry {
    /// Track title
    pub title: String,

    /// Track locator
    pub path: String,
}

impl TrackEntry {
    /// Create a new entry
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_copies_title_and_path() {
        let track = Track {
            id: 7,
            playlist_id: 1,
            title: "Song A".to_string(),
            path: "/music/a.mp3".to_string(),
            position: 3,
        };

        assert_eq!(track.entry(), TrackEntry::new("Song A", "/music/a.mp3"));
    }
}

/// Playlist domain types
use super::ids::PlaylistId;
use serde::{Deserialize, Serialize};

/// A named, ordered collection of tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Store-assigned identifier
    pub id: PlaylistId,

    /// Playlist name (unique across the store)
    pub name: String,
}

impl Playlist {
    /// Create a playlist value with a known ID (for database loading)
    pub fn with_id(id: PlaylistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

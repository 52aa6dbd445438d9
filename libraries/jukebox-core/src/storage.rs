//! Track store trait

use crate::error::Result;
use crate::types::{Playlist, PlaylistId, Track, TrackEntry};
use async_trait::async_trait;

/// Durable storage for playlists and their ordered tracks
///
/// Every method is atomic on its own: implementations run multi-statement
/// operations inside a single transaction. Positions are 1-based and stay
/// dense (`1..=n`) after every call that changes membership or order.
#[async_trait]
pub trait TrackStore: Send + Sync {
    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist
    ///
    /// Returns `JukeboxError::Duplicate` if the name is taken.
    async fn create_playlist(&self, name: &str) -> Result<Playlist>;

    /// Return the playlist with this name, creating it if needed
    async fn ensure_playlist(&self, name: &str) -> Result<Playlist>;

    /// Get playlist by ID
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Find playlist by exact name
    async fn find_playlist_by_name(&self, name: &str) -> Result<Option<Playlist>>;

    /// All playlists ordered by ID
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Delete a playlist and all of its tracks
    ///
    /// Returns `JukeboxError::PlaylistNotFound` if it does not exist.
    async fn delete_playlist(&self, id: PlaylistId) -> Result<()>;

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Append a track at the end of a playlist
    ///
    /// Returns `JukeboxError::Duplicate` if the title already exists there.
    async fn add_track(&self, playlist_id: PlaylistId, title: &str, path: &str) -> Result<Track>;

    /// Remove a track by title and close the gap in positions
    ///
    /// Returns `JukeboxError::TrackNotFound` if no such title exists.
    async fn remove_track(&self, playlist_id: PlaylistId, title: &str) -> Result<()>;

    /// Tracks of a playlist in position order
    async fn get_tracks(&self, playlist_id: PlaylistId) -> Result<Vec<Track>>;

    /// Find a track by title within a playlist
    async fn find_track(&self, playlist_id: PlaylistId, title: &str) -> Result<Option<Track>>;

    /// Assign a uniformly random permutation of `1..=n` as positions
    async fn shuffle_tracks(&self, playlist_id: PlaylistId) -> Result<()>;

    /// Replace every track of a playlist with `entries`, in order
    async fn replace_tracks(&self, playlist_id: PlaylistId, entries: &[TrackEntry]) -> Result<()>;

    /// Convenience: the `(title, path)` list of a playlist in order
    async fn get_entries(&self, playlist_id: PlaylistId) -> Result<Vec<TrackEntry>> {
        Ok(self
            .get_tracks(playlist_id)
            .await?
            .iter()
            .map(Track::entry)
            .collect())
    }
}

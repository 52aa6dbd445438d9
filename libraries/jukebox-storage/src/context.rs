use crate::{playlists, tracks};
use async_trait::async_trait;
use jukebox_core::{error::Result, storage::TrackStore, types::*};
use sqlx::SqlitePool;

/// Track store backed by a local `SQLite` database
#[derive(Clone)]
pub struct LocalTrackStore {
    pool: SqlitePool,
}

impl LocalTrackStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TrackStore for LocalTrackStore {
    // Playlists
    async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        playlists::create(&self.pool, name).await
    }

    async fn ensure_playlist(&self, name: &str) -> Result<Playlist> {
        playlists::ensure(&self.pool, name).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn find_playlist_by_name(&self, name: &str) -> Result<Option<Playlist>> {
        playlists::find_by_name(&self.pool, name).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    // Tracks
    async fn add_track(&self, playlist_id: PlaylistId, title: &str, path: &str) -> Result<Track> {
        tracks::add(&self.pool, playlist_id, title, path).await
    }

    async fn remove_track(&self, playlist_id: PlaylistId, title: &str) -> Result<()> {
        tracks::remove(&self.pool, playlist_id, title).await
    }

    async fn get_tracks(&self, playlist_id: PlaylistId) -> Result<Vec<Track>> {
        tracks::get_by_playlist(&self.pool, playlist_id).await
    }

    async fn find_track(&self, playlist_id: PlaylistId, title: &str) -> Result<Option<Track>> {
        tracks::find_by_title(&self.pool, playlist_id, title).await
    }

    async fn shuffle_tracks(&self, playlist_id: PlaylistId) -> Result<()> {
        tracks::shuffle(&self.pool, playlist_id).await
    }

    async fn replace_tracks(&self, playlist_id: PlaylistId, entries: &[TrackEntry]) -> Result<()> {
        tracks::replace_all(&self.pool, playlist_id, entries).await
    }
}

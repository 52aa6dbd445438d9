use jukebox_core::{error::Result, types::*, JukeboxError};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn playlist_from_row(row: &SqliteRow) -> Playlist {
    Playlist::with_id(row.get("id"), row.get::<String, _>("name"))
}

/// Get all playlists, oldest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query("SELECT id, name FROM playlists ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(playlist_from_row).collect())
}

/// Get playlist by ID
pub async fn get_by_id(pool: &SqlitePool, id: PlaylistId) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name FROM playlists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(playlist_from_row))
}

/// Find playlist by exact name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Playlist>> {
    let row = sqlx::query("SELECT id, name FROM playlists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(playlist_from_row))
}

/// Create new playlist
///
/// A taken name comes back as `JukeboxError::Duplicate`.
pub async fn create(pool: &SqlitePool, name: &str) -> Result<Playlist> {
    let result = sqlx::query("INSERT INTO playlists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| match JukeboxError::from(e) {
            JukeboxError::Duplicate(_) => {
                JukeboxError::Duplicate(format!("playlist '{name}'"))
            }
            other => other,
        })?;

    Ok(Playlist::with_id(result.last_insert_rowid(), name))
}

/// Get the playlist with this name, creating it first if it is missing
pub async fn ensure(pool: &SqlitePool, name: &str) -> Result<Playlist> {
    sqlx::query("INSERT OR IGNORE INTO playlists (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    find_by_name(pool, name)
        .await?
        .ok_or_else(|| JukeboxError::storage(format!("playlist '{name}' vanished after insert")))
}

/// Delete playlist together with its tracks
pub async fn delete(pool: &SqlitePool, id: PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM tracks WHERE playlist_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(JukeboxError::PlaylistNotFound(id));
    }

    tx.commit().await?;

    Ok(())
}

/// Number of tracks in a playlist
pub async fn track_count(pool: &SqlitePool, id: PlaylistId) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks WHERE playlist_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

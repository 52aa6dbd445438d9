use jukebox_core::{error::Result, types::*, JukeboxError};
use rand::seq::SliceRandom;
use rand::thread_rng;
use sqlx::{sqlite::SqliteRow, Row, Sqlite, SqlitePool, Transaction};

fn track_from_row(row: &SqliteRow) -> Track {
    Track {
        id: row.get("id"),
        playlist_id: row.get("playlist_id"),
        title: row.get("title"),
        path: row.get("path"),
        position: row.get("position"),
    }
}

/// Take the write lock and confirm the playlist exists.
///
/// Touching the playlist row first means the rest of the transaction reads
/// positions that no other writer can change underneath it.
async fn lock_playlist(tx: &mut Transaction<'_, Sqlite>, playlist_id: PlaylistId) -> Result<()> {
    let result = sqlx::query("UPDATE playlists SET name = name WHERE id = ?")
        .bind(playlist_id)
        .execute(&mut **tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(JukeboxError::PlaylistNotFound(playlist_id));
    }

    Ok(())
}

/// Get tracks of a playlist in position order
pub async fn get_by_playlist(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT id, playlist_id, title, path, position
        FROM tracks
        WHERE playlist_id = ?
        ORDER BY position
        "#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(track_from_row).collect())
}

/// Find a track by title within a playlist
pub async fn find_by_title(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    title: &str,
) -> Result<Option<Track>> {
    let row = sqlx::query(
        r#"
        SELECT id, playlist_id, title, path, position
        FROM tracks
        WHERE playlist_id = ? AND title = ?
        "#,
    )
    .bind(playlist_id)
    .bind(title)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(track_from_row))
}

/// Append track to the end of a playlist
///
/// Next position and insert happen in one statement, so two concurrent
/// adds can never pick the same position.
pub async fn add(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    title: &str,
    path: &str,
) -> Result<Track> {
    let result = sqlx::query(
        r#"
        INSERT INTO tracks (playlist_id, title, path, position)
        SELECT ?, ?, ?, COALESCE(MAX(position), 0) + 1
        FROM tracks
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .bind(title)
    .bind(path)
    .bind(playlist_id)
    .execute(pool)
    .await
    .map_err(|e| match JukeboxError::from(e) {
        JukeboxError::Duplicate(_) => {
            JukeboxError::Duplicate(format!("track '{title}' in playlist {playlist_id}"))
        }
        other => other,
    })?;

    let row = sqlx::query("SELECT id, playlist_id, title, path, position FROM tracks WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await?;

    Ok(track_from_row(&row))
}

/// Remove track from playlist and close the gap
pub async fn remove(pool: &SqlitePool, playlist_id: PlaylistId, title: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    lock_playlist(&mut tx, playlist_id).await?;

    let result = sqlx::query("DELETE FROM tracks WHERE playlist_id = ? AND title = ?")
        .bind(playlist_id)
        .bind(title)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(JukeboxError::TrackNotFound {
            playlist_id,
            title: title.to_string(),
        });
    }

    // Renumber to 1..=n
    sqlx::query(
        r#"
        UPDATE tracks
        SET position = (
            SELECT COUNT(*)
            FROM tracks t2
            WHERE t2.playlist_id = tracks.playlist_id
              AND t2.position < tracks.position
        ) + 1
        WHERE playlist_id = ?
        "#,
    )
    .bind(playlist_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(())
}

/// Give the tracks of a playlist a uniformly random order
pub async fn shuffle(pool: &SqlitePool, playlist_id: PlaylistId) -> Result<()> {
    let mut tx = pool.begin().await?;

    lock_playlist(&mut tx, playlist_id).await?;

    let ids: Vec<TrackId> =
        sqlx::query_scalar("SELECT id FROM tracks WHERE playlist_id = ? ORDER BY position")
            .bind(playlist_id)
            .fetch_all(&mut *tx)
            .await?;

    let positions = random_positions(ids.len());

    for (id, position) in ids.iter().zip(positions) {
        sqlx::query("UPDATE tracks SET position = ? WHERE id = ?")
            .bind(position)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// Replace every track of a playlist with `entries`, keeping their order
pub async fn replace_all(
    pool: &SqlitePool,
    playlist_id: PlaylistId,
    entries: &[TrackEntry],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    lock_playlist(&mut tx, playlist_id).await?;

    sqlx::query("DELETE FROM tracks WHERE playlist_id = ?")
        .bind(playlist_id)
        .execute(&mut *tx)
        .await?;

    for (index, entry) in entries.iter().enumerate() {
        sqlx::query(
            "INSERT INTO tracks (playlist_id, title, path, position) VALUES (?, ?, ?, ?)",
        )
        .bind(playlist_id)
        .bind(&entry.title)
        .bind(&entry.path)
        .bind(index as i64 + 1)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(())
}

/// Positions `1..=n` in Fisher-Yates order
fn random_positions(n: usize) -> Vec<i64> {
    let mut positions: Vec<i64> = (1..=n as i64).collect();
    positions.shuffle(&mut thread_rng());
    positions
}

//! Playlist and track commands

use super::NO_PLAYLIST_SELECTED;
use crate::session::Session;
use crate::state::AppState;
use jukebox_core::{error::Result, JukeboxError, PlaylistId};
use std::fmt::Write;

pub(super) async fn add_playlist(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    if args.is_empty() {
        return Ok(String::new());
    }
    let name = args.join(" ");

    match state.store.create_playlist(&name).await {
        Ok(playlist) => {
            session.select_playlist(playlist.id);
            Ok(format!("Playlist '{name}' created."))
        }
        Err(e) if e.is_duplicate() => {
            if let Some(existing) = state.store.find_playlist_by_name(&name).await? {
                session.select_playlist(existing.id);
            }
            Ok(format!("Playlist '{name}' already exists. Ignoring."))
        }
        Err(e) => Err(e),
    }
}

pub(super) async fn add_track(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    let [playlist_name, title, path] = args else {
        return Ok(String::new());
    };
    if session.current_playlist_id().is_none() {
        return Ok(NO_PLAYLIST_SELECTED.to_string());
    }

    let playlist = state.store.ensure_playlist(playlist_name).await?;

    match state.store.add_track(playlist.id, title, path).await {
        Ok(track) => {
            tracing::debug!(playlist_id = playlist.id, position = track.position, "Track added");
            Ok(format!(
                "Track '{title}' added to the playlist '{playlist_name}'."
            ))
        }
        Err(e) if e.is_duplicate() => Ok(format!(
            "Track '{title}' already exists in the playlist '{playlist_name}'. Ignoring."
        )),
        Err(e) => Err(e),
    }
}

pub(super) async fn remove_track(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    let [playlist_name, title] = args else {
        return Ok(String::new());
    };
    if session.current_playlist_id().is_none() {
        return Ok(NO_PLAYLIST_SELECTED.to_string());
    }

    let Some(playlist) = state.store.find_playlist_by_name(playlist_name).await? else {
        return Ok(format!("Playlist '{playlist_name}' not found."));
    };

    match state.store.remove_track(playlist.id, title).await {
        Ok(()) => Ok(format!(
            "Track '{title}' removed from the playlist '{playlist_name}'."
        )),
        Err(JukeboxError::TrackNotFound { .. }) => Ok(format!(
            "Track '{title}' not found in the playlist '{playlist_name}'."
        )),
        Err(e) => Err(e),
    }
}

pub(super) async fn shuffle(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    let [playlist_name] = args else {
        return Ok(String::new());
    };
    if session.current_playlist_id().is_none() {
        return Ok(NO_PLAYLIST_SELECTED.to_string());
    }

    let Some(playlist) = state.store.find_playlist_by_name(playlist_name).await? else {
        return Ok(format!("Playlist '{playlist_name}' not found."));
    };

    state.store.shuffle_tracks(playlist.id).await?;

    Ok(format!("Shuffled the playlist '{playlist_name}'."))
}

pub(super) async fn show_playlists(state: &AppState) -> Result<String> {
    let playlists = state.store.list_playlists().await?;
    if playlists.is_empty() {
        return Ok("No playlists found.".to_string());
    }

    let mut reply = String::from("Available playlists: \n");
    for playlist in playlists {
        let _ = writeln!(reply, "{}. {} ", playlist.id, playlist.name);
    }
    Ok(reply)
}

pub(super) async fn show_tracks(state: &AppState, args: &[String]) -> Result<String> {
    let [playlist_name] = args else {
        return Ok(String::new());
    };

    let Some(playlist) = state.store.find_playlist_by_name(playlist_name).await? else {
        return Ok("Playlist not found.".to_string());
    };

    let tracks = state.store.get_tracks(playlist.id).await?;
    if tracks.is_empty() {
        return Ok(format!("No tracks found for the playlist '{playlist_name}'."));
    }

    let mut reply = format!("Tracks for the playlist '{playlist_name}': \n");
    for track in tracks {
        let _ = writeln!(reply, "{} - {} ", track.title, track.path);
    }
    Ok(reply)
}

pub(super) async fn show_tracks_with_order(state: &AppState, args: &[String]) -> Result<String> {
    let [playlist_name] = args else {
        return Ok(String::new());
    };

    let Some(playlist) = state.store.find_playlist_by_name(playlist_name).await? else {
        return Ok(format!("Playlist '{playlist_name}' not found."));
    };

    let tracks = state.store.get_tracks(playlist.id).await?;
    if tracks.is_empty() {
        return Ok(format!("No tracks found for the playlist '{playlist_name}'."));
    }

    let mut reply = format!("Tracks for the playlist '{playlist_name}' with their current order:\n");
    for track in tracks {
        let _ = writeln!(reply, "{}. {}", track.position, track.title);
    }
    Ok(reply)
}

pub(super) async fn select_playlist(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    let [raw_id] = args else {
        return Ok(String::new());
    };

    let Ok(id) = raw_id.parse::<PlaylistId>() else {
        return Ok(format!("Invalid playlist id: {raw_id}"));
    };

    if state.store.get_playlist(id).await?.is_none() {
        return Ok("Playlist not found.".to_string());
    }

    session.select_playlist(id);
    Ok(format!("Playlist selected: {id}"))
}

pub(super) async fn remove_playlist(
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> Result<String> {
    let [playlist_name] = args else {
        return Ok(String::new());
    };

    let Some(playlist) = state.store.find_playlist_by_name(playlist_name).await? else {
        return Ok(format!("Playlist '{playlist_name}' not found."));
    };

    state.store.delete_playlist(playlist.id).await?;

    if session.current_playlist_id() == Some(playlist.id) {
        session.stop(state.engine.as_ref());
        session.clear_selection();
    }

    Ok(format!("Playlist '{playlist_name}' and its tracks removed."))
}

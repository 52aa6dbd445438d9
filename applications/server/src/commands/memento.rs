//! Undo commands

use super::NO_PLAYLIST_SELECTED;
use crate::memento::PlaylistMemento;
use crate::session::Session;
use crate::state::AppState;
use jukebox_core::error::Result;

pub(super) async fn save(state: &AppState, session: &mut Session) -> Result<String> {
    let Some(playlist_id) = session.current_playlist_id() else {
        return Ok(NO_PLAYLIST_SELECTED.to_string());
    };

    let entries = state.store.get_entries(playlist_id).await?;
    session
        .mementos_mut()
        .push(PlaylistMemento::new(playlist_id, entries));

    Ok(format!("Memento saved for playlist: {playlist_id}"))
}

pub(super) async fn restore(state: &AppState, session: &mut Session) -> Result<String> {
    let Some(memento) = session.mementos_mut().pop() else {
        return Ok("No mementos available for restoration.".to_string());
    };
    let playlist_id = memento.playlist_id();

    if state.store.get_playlist(playlist_id).await?.is_none() {
        return Ok(format!("Playlist {playlist_id} no longer exists."));
    }

    state
        .store
        .replace_tracks(playlist_id, memento.entries())
        .await?;
    session.select_playlist(playlist_id);

    Ok(format!("Playlist restored from memento: {playlist_id}"))
}

//! Playback commands

use super::NO_PLAYLIST_SELECTED;
use crate::session::Session;
use crate::state::AppState;
use jukebox_core::{error::Result, Track};
use jukebox_playback::{QueueTrack, RepeatMode};

/// Whether `play_track` plays once or loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TrackMode {
    Once,
    Loop,
}

fn queue_of(tracks: Vec<Track>) -> Vec<QueueTrack> {
    tracks
        .into_iter()
        .map(|track| QueueTrack::new(track.title, track.path))
        .collect()
}

/// Snapshot the selected playlist, or the reply explaining why there is none
async fn current_queue(
    state: &AppState,
    session: &Session,
) -> Result<std::result::Result<Vec<QueueTrack>, &'static str>> {
    let Some(playlist_id) = session.current_playlist_id() else {
        return Ok(Err(NO_PLAYLIST_SELECTED));
    };

    let tracks = state.store.get_tracks(playlist_id).await?;
    if tracks.is_empty() {
        return Ok(Err("Current playlist is empty. Add some songs."));
    }

    Ok(Ok(queue_of(tracks)))
}

pub(super) async fn play(state: &AppState, session: &mut Session) -> Result<String> {
    let queue = match current_queue(state, session).await? {
        Ok(queue) => queue,
        Err(reply) => return Ok(reply.to_string()),
    };

    session.start_playback(
        state.engine.clone(),
        queue,
        RepeatMode::Off,
        state.poll_interval,
    );

    Ok("Playing........".to_string())
}

pub(super) async fn play_playlist_loop(state: &AppState, session: &mut Session) -> Result<String> {
    let queue = match current_queue(state, session).await? {
        Ok(queue) => queue,
        Err(reply) => return Ok(reply.to_string()),
    };

    session.start_playback(
        state.engine.clone(),
        queue,
        RepeatMode::All,
        state.poll_interval,
    );

    Ok("Looping the current playlist. Use 'stop' to end the loop.".to_string())
}

pub(super) async fn play_track(
    state: &AppState,
    session: &mut Session,
    args: &[String],
    mode: TrackMode,
) -> Result<String> {
    let [playlist_name, title] = args else {
        return Ok(String::new());
    };
    if session.current_playlist_id().is_none() {
        return Ok(NO_PLAYLIST_SELECTED.to_string());
    }

    let track = match state.store.find_playlist_by_name(playlist_name).await? {
        Some(playlist) => state.store.find_track(playlist.id, title).await?,
        None => None,
    };
    let Some(track) = track else {
        return Ok(format!(
            "Track '{title}' not found in the playlist '{playlist_name}'."
        ));
    };

    let (repeat, reply) = match mode {
        TrackMode::Once => (
            RepeatMode::Off,
            format!("Playing: {title} from the playlist '{playlist_name}'"),
        ),
        TrackMode::Loop => (
            RepeatMode::One,
            format!(
                "Looping: {title} from the playlist '{playlist_name}'. Use 'stop' to end the loop."
            ),
        ),
    };

    session.start_playback(
        state.engine.clone(),
        queue_of(vec![track]),
        repeat,
        state.poll_interval,
    );

    Ok(reply)
}

pub(super) fn pause(state: &AppState, session: &mut Session) -> String {
    if session.pause(state.engine.as_ref()) {
        "Paused".to_string()
    } else {
        "Nothing is playing.".to_string()
    }
}

pub(super) fn unpause(state: &AppState, session: &mut Session) -> String {
    if session.resume(state.engine.as_ref()) {
        "Music resumed.".to_string()
    } else {
        "Playback is not paused.".to_string()
    }
}

pub(super) fn stop(state: &AppState, session: &mut Session) -> String {
    session.stop(state.engine.as_ref());
    "Music stopped.".to_string()
}

pub(super) fn set_equalizer(state: &AppState, args: &[String]) -> Result<String> {
    let [raw_level] = args else {
        return Ok(String::new());
    };

    let Ok(level) = raw_level.parse::<f32>() else {
        return Ok(format!("Invalid equalizer level: {raw_level}"));
    };

    if !(0.0..=1.0).contains(&level) {
        return Ok("Equalizer level must be between 0.0 and 1.0.".to_string());
    }

    state.engine.set_volume(level)?;

    Ok(format!("Equalizer set to level {level:?}"))
}

//! Command registry
//!
//! Every command the server understands is a [`CommandKind`]. The static
//! [`COMMANDS`] table maps names to kinds and also produces the `help`
//! listing. Handlers return their reply; store and engine failures become
//! an `Error: ...` reply in [`execute`].

mod memento;
mod playback;
mod playlists;

use crate::session::Session;
use crate::state::AppState;
use std::fmt::Write;

/// Reply of every command that needs a selected playlist
pub(crate) const NO_PLAYLIST_SELECTED: &str = "No playlist selected. Create or select a playlist.";

/// Closed set of supported commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    Play,
    Pause,
    Unpause,
    Stop,
    AddPlaylist,
    AddTrackToPlaylist,
    RemoveTrackFromPlaylist,
    ShufflePlaylist,
    ShowPlaylists,
    ShowTracksForPlaylist,
    ShowTracksWithOrder,
    SelectPlaylist,
    PlayTrack,
    PlayTrackLoop,
    PlayPlaylistLoop,
    RemovePlaylist,
    SetEqualizer,
    SaveMemento,
    RestoreMemento,
}

/// Registry entry
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub usage: &'static str,
    pub summary: &'static str,
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        kind: CommandKind::Help,
        usage: "help",
        summary: "Show this list.",
    },
    CommandSpec {
        name: "play",
        kind: CommandKind::Play,
        usage: "play",
        summary: "Play the current playlist.",
    },
    CommandSpec {
        name: "pause",
        kind: CommandKind::Pause,
        usage: "pause",
        summary: "Pause the playback.",
    },
    CommandSpec {
        name: "unpause",
        kind: CommandKind::Unpause,
        usage: "unpause",
        summary: "Resume the playback.",
    },
    CommandSpec {
        name: "stop",
        kind: CommandKind::Stop,
        usage: "stop",
        summary: "Stop the music playback, including loops.",
    },
    CommandSpec {
        name: "add_playlist",
        kind: CommandKind::AddPlaylist,
        usage: "add_playlist [name]",
        summary: "Create a new playlist and select it.",
    },
    CommandSpec {
        name: "add_track_to_playlist",
        kind: CommandKind::AddTrackToPlaylist,
        usage: "add_track_to_playlist [playlist_name] [track_title] [track_path]",
        summary: "Add a track to a playlist.",
    },
    CommandSpec {
        name: "remove_track_from_playlist",
        kind: CommandKind::RemoveTrackFromPlaylist,
        usage: "remove_track_from_playlist [playlist_name] [track_title]",
        summary: "Remove a track from a playlist.",
    },
    CommandSpec {
        name: "shuffle_playlist",
        kind: CommandKind::ShufflePlaylist,
        usage: "shuffle_playlist [playlist_name]",
        summary: "Shuffle the tracks in a playlist.",
    },
    CommandSpec {
        name: "show_playlists",
        kind: CommandKind::ShowPlaylists,
        usage: "show_playlists",
        summary: "Show all playlists.",
    },
    CommandSpec {
        name: "show_tracks_for_playlist",
        kind: CommandKind::ShowTracksForPlaylist,
        usage: "show_tracks_for_playlist [playlist_name]",
        summary: "Show tracks for a specific playlist.",
    },
    CommandSpec {
        name: "show_tracks_with_order",
        kind: CommandKind::ShowTracksWithOrder,
        usage: "show_tracks_with_order [playlist_name]",
        summary: "Show tracks for a playlist with their current order.",
    },
    CommandSpec {
        name: "select_playlist",
        kind: CommandKind::SelectPlaylist,
        usage: "select_playlist [playlist_id]",
        summary: "Select a playlist by ID.",
    },
    CommandSpec {
        name: "play_track",
        kind: CommandKind::PlayTrack,
        usage: "play_track [playlist_name] [track_title]",
        summary: "Play a specific track from a playlist.",
    },
    CommandSpec {
        name: "play_track_loop",
        kind: CommandKind::PlayTrackLoop,
        usage: "play_track_loop [playlist_name] [track_title]",
        summary: "Loop a specific track from a playlist until 'stop'.",
    },
    CommandSpec {
        name: "play_playlist_loop",
        kind: CommandKind::PlayPlaylistLoop,
        usage: "play_playlist_loop",
        summary: "Loop the current playlist until 'stop'.",
    },
    CommandSpec {
        name: "remove_playlist",
        kind: CommandKind::RemovePlaylist,
        usage: "remove_playlist [playlist_name]",
        summary: "Remove a playlist and its tracks.",
    },
    CommandSpec {
        name: "set_equalizer",
        kind: CommandKind::SetEqualizer,
        usage: "set_equalizer [level]",
        summary: "Set the playback level (0.0 to 1.0).",
    },
    CommandSpec {
        name: "save_memento",
        kind: CommandKind::SaveMemento,
        usage: "save_memento",
        summary: "Save a snapshot of the current playlist.",
    },
    CommandSpec {
        name: "restore_memento",
        kind: CommandKind::RestoreMemento,
        usage: "restore_memento",
        summary: "Restore the most recent snapshot.",
    },
];

impl CommandKind {
    /// Look up a command by name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .map(|spec| spec.kind)
    }

    pub fn name(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|spec| spec.kind == self)
            .map_or("unknown", |spec| spec.name)
    }

    /// Commands that touch the undo history
    pub fn is_memento(self) -> bool {
        matches!(self, Self::SaveMemento | Self::RestoreMemento)
    }
}

/// Static `help` listing
pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n");
    for spec in COMMANDS {
        let _ = writeln!(text, "- {}: {}", spec.usage, spec.summary);
    }
    text
}

/// Run `kind` against the session and return its reply
pub async fn execute(
    kind: CommandKind,
    state: &AppState,
    session: &mut Session,
    args: &[String],
) -> String {
    let result = match kind {
        CommandKind::Help => Ok(help_text()),
        CommandKind::Play => playback::play(state, session).await,
        CommandKind::Pause => Ok(playback::pause(state, session)),
        CommandKind::Unpause => Ok(playback::unpause(state, session)),
        CommandKind::Stop => Ok(playback::stop(state, session)),
        CommandKind::AddPlaylist => playlists::add_playlist(state, session, args).await,
        CommandKind::AddTrackToPlaylist => playlists::add_track(state, session, args).await,
        CommandKind::RemoveTrackFromPlaylist => {
            playlists::remove_track(state, session, args).await
        }
        CommandKind::ShufflePlaylist => playlists::shuffle(state, session, args).await,
        CommandKind::ShowPlaylists => playlists::show_playlists(state).await,
        CommandKind::ShowTracksForPlaylist => playlists::show_tracks(state, args).await,
        CommandKind::ShowTracksWithOrder => playlists::show_tracks_with_order(state, args).await,
        CommandKind::SelectPlaylist => playlists::select_playlist(state, session, args).await,
        CommandKind::PlayTrack => {
            playback::play_track(state, session, args, playback::TrackMode::Once).await
        }
        CommandKind::PlayTrackLoop => {
            playback::play_track(state, session, args, playback::TrackMode::Loop).await
        }
        CommandKind::PlayPlaylistLoop => playback::play_playlist_loop(state, session).await,
        CommandKind::RemovePlaylist => playlists::remove_playlist(state, session, args).await,
        CommandKind::SetEqualizer => playback::set_equalizer(state, args),
        CommandKind::SaveMemento => memento::save(state, session).await,
        CommandKind::RestoreMemento => memento::restore(state, session).await,
    };

    result.unwrap_or_else(|e| {
        tracing::error!(command = kind.name(), error = %e, "Command failed");
        format!("Error: {e}")
    })
}

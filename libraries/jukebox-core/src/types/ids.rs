//! ID types for Jukebox entities
//!
//! Both ids are assigned by the track store (`INTEGER PRIMARY KEY`).

/// Playlist identifier
pub type PlaylistId = i64;

/// Track identifier
pub type TrackId = i64;

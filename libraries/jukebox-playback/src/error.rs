//! Error types for playback

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The track locator does not point at a readable file
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// Audio source error (probing, unsupported format)
    #[error("Audio source error: {0}")]
    AudioSource(String),

    /// Volume outside `0.0..=1.0`
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl From<PlaybackError> for jukebox_core::JukeboxError {
    fn from(err: PlaybackError) -> Self {
        jukebox_core::JukeboxError::playback(err.to_string())
    }
}

/// Core traits for Jukebox
use crate::error::Result;
use std::path::Path;

/// Playback engine trait
///
/// Implementers own the actual audio output. The engine is shared between
/// command handlers (pause, volume, stop) and the background job that walks
/// the queue, so every method takes `&self` and implementations handle
/// their own locking.
pub trait PlaybackEngine: Send + Sync {
    /// Load a track, replacing whatever was loaded before
    ///
    /// # Errors
    /// Returns an error if the locator cannot be opened
    fn load(&self, path: &Path) -> Result<()>;

    /// Start the loaded track from the beginning
    ///
    /// # Errors
    /// Returns an error if nothing is loaded
    fn play(&self) -> Result<()>;

    /// Pause playback, keeping the current position
    fn pause(&self);

    /// Resume a paused track
    fn resume(&self);

    /// Stop playback and unload the track
    fn stop(&self);

    /// Set the output volume (0.0 = silent, 1.0 = full volume)
    ///
    /// # Errors
    /// Returns an error if the level is outside `0.0..=1.0`
    fn set_volume(&self, volume: f32) -> Result<()>;

    /// Get the current volume
    fn volume(&self) -> f32;

    /// True while a track is loaded and has not reached its end.
    ///
    /// A paused track still counts as busy.
    fn is_busy(&self) -> bool;
}

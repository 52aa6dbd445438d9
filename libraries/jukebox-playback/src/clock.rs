//! Clock-driven playback engine
//!
//! `ClockEngine` does not open an audio device. It tracks a play head
//! against each track's probed duration, which is enough for a server
//! whose clients only observe play/pause/stop state. Real output engines
//! implement the same [`PlaybackEngine`] trait.

use crate::error::PlaybackError;
use crate::probe::probe_duration;
use crate::types::PlaybackConfig;
use crate::volume::Volume;
use jukebox_core::{error::Result, PlaybackEngine};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy)]
enum Transport {
    Empty,
    Loaded {
        duration: Duration,
    },
    Playing {
        duration: Duration,
        started: Instant,
        offset: Duration,
    },
    Paused {
        duration: Duration,
        elapsed: Duration,
    },
}

impl Transport {
    fn duration(&self) -> Option<Duration> {
        match *self {
            Transport::Empty => None,
            Transport::Loaded { duration }
            | Transport::Playing { duration, .. }
            | Transport::Paused { duration, .. } => Some(duration),
        }
    }
}

/// Playback engine that plays tracks against the clock
pub struct ClockEngine {
    transport: Mutex<Transport>,
    volume: Mutex<Volume>,
    fallback_duration: Duration,
}

impl ClockEngine {
    /// Create an engine
    ///
    /// `fallback_duration` is used for files whose length can't be read
    /// from their headers.
    pub fn new(fallback_duration: Duration, volume: f32) -> Self {
        Self {
            transport: Mutex::new(Transport::Empty),
            volume: Mutex::new(Volume::new(volume)),
            fallback_duration,
        }
    }

    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(config.fallback_duration, config.volume)
    }

    /// Duration of the loaded track, if any
    pub fn loaded_duration(&self) -> Option<Duration> {
        self.transport().duration()
    }

    /// Time played of the current track
    pub fn position(&self) -> Duration {
        match *self.transport() {
            Transport::Empty | Transport::Loaded { .. } => Duration::ZERO,
            Transport::Playing {
                duration,
                started,
                offset,
            } => (offset + started.elapsed()).min(duration),
            Transport::Paused { elapsed, .. } => elapsed,
        }
    }

    // A panic while holding the lock leaves the transport in a valid state,
    // so poisoning is ignored.
    fn transport(&self) -> MutexGuard<'_, Transport> {
        self.transport.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn volume_lock(&self) -> MutexGuard<'_, Volume> {
        self.volume.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn track_duration(&self, path: &Path) -> std::result::Result<Duration, PlaybackError> {
        match probe_duration(path) {
            Ok(Some(duration)) => Ok(duration),
            Ok(None) => {
                tracing::debug!(path = %path.display(), "No duration in headers, using fallback");
                Ok(self.fallback_duration)
            }
            Err(PlaybackError::AudioSource(e)) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not probe track, using fallback duration");
                Ok(self.fallback_duration)
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for ClockEngine {
    fn default() -> Self {
        Self::from_config(&PlaybackConfig::default())
    }
}

impl PlaybackEngine for ClockEngine {
    /// Opens and probes the file synchronously; async callers should run
    /// it on the blocking pool, as [`run_queue`](crate::run_queue) does.
    fn load(&self, path: &Path) -> Result<()> {
        let duration = self.track_duration(path)?;

        *self.transport() = Transport::Loaded { duration };
        tracing::debug!(path = %path.display(), ?duration, "Track loaded");

        Ok(())
    }

    fn play(&self) -> Result<()> {
        let mut transport = self.transport();
        let duration = transport.duration().ok_or(PlaybackError::NoTrackLoaded)?;

        *transport = Transport::Playing {
            duration,
            started: Instant::now(),
            offset: Duration::ZERO,
        };

        Ok(())
    }

    fn pause(&self) {
        let mut transport = self.transport();
        if let Transport::Playing {
            duration,
            started,
            offset,
        } = *transport
        {
            let elapsed = (offset + started.elapsed()).min(duration);
            *transport = Transport::Paused { duration, elapsed };
            tracing::debug!(?elapsed, "Paused");
        }
    }

    fn resume(&self) {
        let mut transport = self.transport();
        if let Transport::Paused { duration, elapsed } = *transport {
            *transport = Transport::Playing {
                duration,
                started: Instant::now(),
                offset: elapsed,
            };
            tracing::debug!(?elapsed, "Resumed");
        }
    }

    fn stop(&self) {
        *self.transport() = Transport::Empty;
    }

    fn set_volume(&self, volume: f32) -> Result<()> {
        let mut current = self.volume_lock();
        current.set_level(volume)?;
        tracing::debug!(level = volume, db = current.to_db(), "Volume changed");
        Ok(())
    }

    fn volume(&self) -> f32 {
        self.volume_lock().level()
    }

    fn is_busy(&self) -> bool {
        match *self.transport() {
            Transport::Empty | Transport::Loaded { .. } => false,
            Transport::Playing {
                duration,
                started,
                offset,
            } => offset + started.elapsed() < duration,
            Transport::Paused { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_core::JukeboxError;

    fn engine_with_track(secs: u64) -> (ClockEngine, tempfile::NamedTempFile) {
        let engine = ClockEngine::new(Duration::from_secs(secs), 0.5);
        let file = tempfile::NamedTempFile::new().unwrap();
        engine.load(file.path()).unwrap();
        (engine, file)
    }

    #[test]
    fn load_missing_file_fails() {
        let engine = ClockEngine::default();
        let result = engine.load(Path::new("/no/such/track.mp3"));

        assert!(matches!(result, Err(JukeboxError::Playback(_))));
        assert!(!engine.is_busy());
    }

    #[test]
    fn unprobeable_file_uses_fallback() {
        let (engine, _file) = engine_with_track(42);
        assert_eq!(engine.loaded_duration(), Some(Duration::from_secs(42)));
    }

    #[test]
    fn play_without_track_fails() {
        let engine = ClockEngine::default();
        assert!(engine.play().is_err());
    }

    #[test]
    fn loaded_is_not_busy_until_played() {
        let (engine, _file) = engine_with_track(10);
        assert!(!engine.is_busy());

        engine.play().unwrap();
        assert!(engine.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn track_finishes_after_its_duration() {
        let (engine, _file) = engine_with_track(10);
        engine.play().unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert!(engine.is_busy());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!engine.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn paused_track_stays_busy() {
        let (engine, _file) = engine_with_track(10);
        engine.play().unwrap();

        tokio::time::advance(Duration::from_secs(4)).await;
        engine.pause();

        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(engine.is_busy());
        assert_eq!(engine.position(), Duration::from_secs(4));

        engine.resume();
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!(engine.is_busy());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!engine.is_busy());
    }

    #[test]
    fn stop_unloads() {
        let (engine, _file) = engine_with_track(10);
        engine.play().unwrap();

        engine.stop();
        assert!(!engine.is_busy());
        assert_eq!(engine.loaded_duration(), None);
        assert!(engine.play().is_err());
    }

    #[test]
    fn volume_rejects_out_of_range() {
        let engine = ClockEngine::new(Duration::from_secs(1), 0.5);

        assert!(engine.set_volume(1.5).is_err());
        assert_eq!(engine.volume(), 0.5);

        engine.set_volume(0.25).unwrap();
        assert_eq!(engine.volume(), 0.25);
    }
}

//! Output volume
//!
//! The level is a linear gain in `0.0..=1.0`, the same scale clients use
//! with `set_equalizer`. dB conversion is kept for log output.

use crate::error::{PlaybackError, Result};

/// Lowest dB value reported by [`Volume::to_db`]
const SILENCE_DB: f32 = -60.0;

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// Out-of-range levels are clamped; NaN becomes full volume.
    pub fn new(level: f32) -> Self {
        let level = if level.is_nan() { 1.0 } else { level.clamp(0.0, 1.0) };

        Self { level }
    }

    /// Set volume level
    ///
    /// # Errors
    /// Returns `PlaybackError::InvalidVolume` if `level` is outside `0.0..=1.0`.
    /// The previous level is kept in that case.
    pub fn set_level(&mut self, level: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&level) {
            return Err(PlaybackError::InvalidVolume(level));
        }

        self.level = level;
        Ok(())
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Current gain in dB, floored at -60 dB
    pub fn to_db(&self) -> f32 {
        let gain = self.level;
        if gain <= 0.0 {
            SILENCE_DB
        } else {
            (20.0 * gain.log10()).max(SILENCE_DB)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

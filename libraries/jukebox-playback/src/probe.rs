//! Track duration probing

use crate::error::{PlaybackError, Result};
use std::path::Path;
use std::time::Duration;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Read the playing time of an audio file from its container headers
///
/// Returns `Ok(None)` when the format is recognised but carries no frame
/// count (some streams only know their length after a full decode).
///
/// # Errors
/// - `PlaybackError::TrackNotFound` if the file does not exist
/// - `PlaybackError::Io` if it cannot be opened
/// - `PlaybackError::AudioSource` if no demuxer recognises it
pub fn probe_duration(path: &Path) -> Result<Option<Duration>> {
    if !path.exists() {
        return Err(PlaybackError::TrackNotFound(path.display().to_string()));
    }

    let file = std::fs::File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| PlaybackError::AudioSource(format!("Failed to probe file: {e}")))?;

    let Some(track) = probed.format.default_track() else {
        return Ok(None);
    };

    let params = &track.codec_params;
    let duration = match (params.time_base, params.n_frames) {
        (Some(time_base), Some(n_frames)) => {
            let time = time_base.calc_time(n_frames);
            Some(Duration::from_secs(time.seconds) + Duration::from_secs_f64(time.frac))
        }
        _ => None,
    };

    Ok(duration)
}

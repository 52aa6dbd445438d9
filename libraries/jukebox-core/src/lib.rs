//! Jukebox Core
//!
//! Domain types, traits, and error handling shared by the Jukebox crates.
//!
//! The core crate defines:
//! - **Domain Types**: `Playlist`, `Track`, `TrackEntry`
//! - **Core Traits**: `TrackStore` (persistence) and `PlaybackEngine` (audio output)
//! - **Error Handling**: Unified `JukeboxError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use jukebox_core::types::{Playlist, TrackEntry};
//!
//! let playlist = Playlist::with_id(1, "Road Trip");
//! let entry = TrackEntry::new("Song A", "/music/a.mp3");
//!
//! assert_eq!(playlist.name, "Road Trip");
//! assert_eq!(entry.title, "Song A");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{JukeboxError, Result};
pub use storage::TrackStore;
pub use traits::PlaybackEngine;
pub use types::{Playlist, PlaylistId, Track, TrackEntry, TrackId};

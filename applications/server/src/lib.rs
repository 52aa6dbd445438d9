//! Jukebox Server Library
//!
//! Multi-client jukebox over a line-oriented TCP protocol. Every
//! connection shares one session: the selected playlist, the undo history
//! and the playback job.
//!
//! This library exposes the server components so they can be driven from
//! tests without a socket.

pub mod commands;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod memento;
pub mod server;
pub mod session;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use dispatcher::Dispatcher;
pub use error::{Result, ServerError};
pub use server::Server;
pub use session::Session;
pub use state::AppState;

/// Server configuration
use crate::error::{Result, ServerError};
use jukebox_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// How often a playback job checks whether the current track ended
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Assumed length of tracks whose duration can't be probed
    #[serde(default = "default_fallback_track_secs")]
    pub fallback_track_secs: u64,

    /// Initial volume (0.0-1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    /// Memento stack cap, 0 = unbounded
    #[serde(default)]
    pub max_mementos: usize,
}

impl PlaybackSettings {
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            fallback_duration: Duration::from_secs(self.fallback_track_secs),
            volume: self.volume,
        }
    }
}

impl SessionSettings {
    pub fn memento_cap(&self) -> Option<usize> {
        (self.max_mementos > 0).then_some(self.max_mementos)
    }
}

impl ServerConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from `path` (or `config.toml`) and environment
    ///
    /// An explicitly given file must exist; the default one is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ServerError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with JUKEBOX_)
        settings = settings.add_source(
            config::Environment::with_prefix("JUKEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(ServerError::Config("server.host must not be empty".to_string()));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "storage.database_url is required (set JUKEBOX_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.playback.poll_interval_ms == 0 {
            return Err(ServerError::Config(
                "playback.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(ServerError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                self.playback.volume
            )));
        }

        Ok(())
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    12345
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/jukebox.db".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        poll_interval_ms: default_poll_interval_ms(),
        fallback_track_secs: default_fallback_track_secs(),
        volume: default_volume(),
    }
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_fallback_track_secs() -> u64 {
    180
}

fn default_volume() -> f32 {
    1.0
}

fn default_session() -> SessionSettings {
    SessionSettings { max_mementos: 0 }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            playback: default_playback(),
            session: default_session(),
        }
    }
}

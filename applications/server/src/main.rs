/// Jukebox Server - multi-client playlist server over TCP
use anyhow::Context;
use clap::{Parser, Subcommand};
use jukebox_core::TrackStore;
use jukebox_playback::ClockEngine;
use jukebox_server::{config::ServerConfig, state::AppState, Server};
use jukebox_storage::LocalTrackStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jukebox-server")]
#[command(about = "Jukebox playlist server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TCP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List playlists and their track counts
    Playlists {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Interactive client for a running server
    Client {
        /// Server host
        #[arg(long, default_value = "127.0.0.1", env = "JUKEBOX_HOST")]
        host: String,
        /// Server port
        #[arg(short, long, default_value_t = 12345, env = "JUKEBOX_PORT")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jukebox_server=info,jukebox_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref()).await?;
        }
        Commands::Playlists { config } => {
            list_playlists(config.as_deref()).await?;
        }
        Commands::Client { host, port } => {
            run_client(&host, port).await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load_from(config_path)?;
    config.validate()?;

    tracing::info!("Starting Jukebox Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let store = open_store(&config).await?;
    tracing::info!("Database connected");

    let playback = config.playback.playback_config();
    let engine = ClockEngine::from_config(&playback);

    let app_state = AppState::new(
        Arc::new(store),
        Arc::new(engine),
        playback.poll_interval,
        config.session.memento_cap(),
    );

    let server = Server::bind(config.bind_address(), app_state)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address()))?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    Ok(())
}

async fn list_playlists(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path)?;
    let store = open_store(&config).await?;

    let playlists = store.list_playlists().await?;
    if playlists.is_empty() {
        println!("No playlists found.");
        return Ok(());
    }

    println!("Playlists:");
    for playlist in playlists {
        let count = jukebox_storage::playlists::track_count(store.pool(), playlist.id).await?;
        println!("  {} - {} ({} tracks)", playlist.id, playlist.name, count);
    }

    Ok(())
}

async fn open_store(config: &ServerConfig) -> anyhow::Result<LocalTrackStore> {
    ensure_database_dir(&config.storage.database_url)?;

    let pool = jukebox_storage::create_pool(&config.storage.database_url).await?;
    jukebox_storage::run_migrations(&pool).await?;

    Ok(LocalTrackStore::new(pool))
}

/// SQLite creates the file but not its parent directory
fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    Ok(())
}

async fn run_client(host: &str, port: u16) -> anyhow::Result<()> {
    let mut stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("failed to connect to {host}:{port}"))?;

    println!("Welcome to the Jukebox CLI. Type 'help' to see available commands.");

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut buffer = vec![0u8; jukebox_server::connection::READ_BUFFER_SIZE];

    loop {
        stdout.write_all(b">> ").await?;
        stdout.flush().await?;

        let Some(line) = stdin.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        stream.write_all(line.as_bytes()).await?;

        // Commands with bad arguments get no reply
        match tokio::time::timeout(Duration::from_secs(2), stream.read(&mut buffer)).await {
            Ok(Ok(0)) => {
                println!("Server closed the connection.");
                break;
            }
            Ok(Ok(n)) => println!("{}", String::from_utf8_lossy(&buffer[..n])),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => println!(),
        }
    }

    Ok(())
}

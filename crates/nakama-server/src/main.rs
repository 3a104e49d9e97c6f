//! nakama-server binary.
//!
//! Reads `nakama.toml` (or the path given with `--config`) layered under the
//! environment and a `.env` file, opens the SQLite store if `DATABASE_URL` is
//! set, and serves the Nakama OS API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use nakama_core::{CollectionMapper, store::DocumentStore as _};
use nakama_server::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Nakama OS backend server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "nakama.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  if let Ok(path) = dotenvy::dotenv() {
    tracing::debug!(path = %path.display(), "loaded .env");
  }

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  // A missing or broken store degrades the API instead of aborting startup.
  let store = match nakama_server::open_store(&server_cfg).await {
    Some(Ok(store)) => {
      tracing::info!(database = store.name(), "store connected");
      Some(Arc::new(store))
    }
    Some(Err(e)) => {
      tracing::error!(error = %e, "failed to open store; serving without one");
      None
    }
    None => {
      tracing::warn!("DATABASE_URL not set; serving without a store");
      None
    }
  };

  let state = AppState {
    mapper: CollectionMapper::from_option(store),
    config: Arc::new(server_cfg.clone()),
  };

  let app = nakama_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

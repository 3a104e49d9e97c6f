//! HTTP server for the Nakama OS backend.
//!
//! Composes the `/api` router from `nakama-api` with the service-level routes
//! (greeting, schema introspection, diagnostics) and owns configuration and
//! store startup.

pub mod diagnostics;

use std::{path::Path, sync::Arc};

use axum::{Json, Router, routing::get};
use nakama_core::{CollectionMapper, schema::describe_all, store::DocumentStore};
use nakama_store_sqlite::SqliteStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, from an optional TOML file and the
/// environment (`PORT`, `DATABASE_URL`, `DATABASE_NAME`, ...).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  /// SQLite file path (optionally `sqlite://`-prefixed) or `:memory:`.
  /// Without it the server runs with no store.
  #[serde(default)]
  pub database_url:  Option<String>,
  #[serde(default)]
  pub database_name: Option<String>,
}

fn default_host() -> String { "0.0.0.0".to_owned() }

fn default_port() -> u16 { 8000 }

impl ServerConfig {
  /// Layer `file` (if it exists) under the process environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(file).required(false))
        .add_source(config::Environment::default()),
    )
  }

  pub fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
  ) -> Result<Self, config::ConfigError> {
    builder.build()?.try_deserialize()
  }
}

/// Open the configured store. `None` when no database is configured.
pub async fn open_store(
  config: &ServerConfig,
) -> Option<Result<SqliteStore, nakama_store_sqlite::Error>> {
  let url = config.database_url.as_deref().filter(|url| !url.is_empty())?;
  let path = url.strip_prefix("sqlite://").unwrap_or(url);
  let opened = if path == ":memory:" {
    SqliteStore::open_in_memory().await
  } else {
    SqliteStore::open(path).await
  };
  Some(opened.map(|store| match &config.database_name {
    Some(name) => store.with_name(name.clone()),
    None => store,
  }))
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the service-level handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub mapper: CollectionMapper<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + Clone + 'static,
{
  let api = nakama_api::api_router(state.mapper.clone());
  Router::new()
    .route("/", get(root))
    .route("/schema", get(schema))
    .route("/test", get(diagnostics::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

/// `GET /`
async fn root() -> Json<Value> {
  Json(json!({
    "message": "Hello from the Nakama OS backend!",
    "service": "Nakama OS API",
  }))
}

/// `GET /schema`: every registered record shape, keyed by collection.
async fn schema() -> Json<Value> {
  Json(json!({ "models": describe_all() }))
}

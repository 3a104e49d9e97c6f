//! `GET /test`: best-effort report on store reachability.
//!
//! Always answers 200. Problems found while probing the store are written
//! into the report instead of failing the request.

use axum::{Json, extract::State};
use nakama_core::{CollectionMapper, store::DocumentStore};
use serde::Serialize;

use crate::{AppState, ServerConfig};

/// Longest error excerpt included in a report.
const ERROR_EXCERPT: usize = 50;
/// Most collection names included in a report.
const MAX_COLLECTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
  pub backend:           String,
  pub database:          String,
  pub database_url:      String,
  pub database_name:     String,
  pub connection_status: String,
  pub collections:       Vec<String>,
}

/// Probe `mapper` and describe what was found.
pub async fn probe<S>(mapper: &CollectionMapper<S>, config: &ServerConfig) -> Report
where
  S: DocumentStore,
{
  let mut report = Report {
    backend:           "✅ Running".into(),
    database:          "❌ Not Available".into(),
    database_url:      set_or_not(config.database_url.as_deref()),
    database_name:     set_or_not(config.database_name.as_deref()),
    connection_status: "Not Connected".into(),
    collections:       Vec::new(),
  };

  let Ok(store) = mapper.handle() else {
    report.database = "⚠️  Available but not initialized".into();
    return report;
  };

  report.database = "✅ Available".into();
  report.connection_status = "Connected".into();
  match store.collection_names().await {
    Ok(mut names) => {
      names.truncate(MAX_COLLECTIONS);
      report.collections = names;
      report.database = "✅ Connected & Working".into();
    }
    Err(e) => {
      tracing::warn!(error = %e, store = store.name(), "diagnostic probe failed");
      report.database = format!("⚠️  Connected but Error: {}", excerpt(&e.to_string()));
    }
  }
  report
}

/// `GET /test`
pub async fn handler<S>(State(state): State<AppState<S>>) -> Json<Report>
where
  S: DocumentStore,
{
  Json(probe(&state.mapper, &state.config).await)
}

fn set_or_not(value: Option<&str>) -> String {
  match value {
    Some(v) if !v.is_empty() => "✅ Set".into(),
    _ => "❌ Not Set".into(),
  }
}

fn excerpt(message: &str) -> String { message.chars().take(ERROR_EXCERPT).collect() }

//! Handlers for `/reward` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/reward/heartbeat` | `?username` required; stamps `last_active_ts` |
//! | `POST` | `/reward/tick` | `?minutes=10&belly_per_active=5`; meant for an external cron |
//!
//! The tick is a plain batch increment. Running it again while a profile is
//! still inside the window credits that profile again.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{Duration, Utc};
use nakama_core::{
  CollectionMapper, Entity, Error,
  store::{DocumentStore, Filter, Mutation},
  timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;

const ACTIVITY_FIELD: &str = "last_active_ts";
const BALANCE_FIELD: &str = "belly";

// ─── Heartbeat ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HeartbeatParams {
  pub username: String,
}

/// `POST /reward/heartbeat?username=<handle>`
pub async fn heartbeat<S>(
  State(mapper): State<CollectionMapper<S>>,
  Query(params): Query<HeartbeatParams>,
) -> Result<Json<Value>, ApiError>
where
  S: DocumentStore,
{
  let result = mapper
    .update_one(
      Entity::Profile,
      &Filter::eq("username", params.username.as_str()),
      &Mutation::set(ACTIVITY_FIELD, timestamp::now()),
    )
    .await?;

  if result.matched == 0 {
    tracing::info!(username = %params.username, "heartbeat for unknown nakama");
    return Err(Error::NotFound("Nakama not found".into()).into());
  }
  Ok(Json(json!({ "ok": true })))
}

// ─── Tick ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TickParams {
  /// Activity window, in minutes before now.
  #[serde(default = "default_minutes")]
  pub minutes:          u32,
  /// $BELLY credited to each profile active inside the window.
  #[serde(default = "default_belly")]
  pub belly_per_active: u32,
}

fn default_minutes() -> u32 { 10 }

fn default_belly() -> u32 { 5 }

#[derive(Debug, Serialize)]
pub struct TickResponse {
  pub ok:       bool,
  /// Number of profiles credited.
  pub rewarded: u64,
  pub belly:    u32,
}

/// `POST /reward/tick[?minutes=10][&belly_per_active=5]`
pub async fn tick<S>(
  State(mapper): State<CollectionMapper<S>>,
  Query(params): Query<TickParams>,
) -> Result<Json<TickResponse>, ApiError>
where
  S: DocumentStore,
{
  let threshold = Utc::now() - Duration::minutes(i64::from(params.minutes));
  let result = mapper
    .update_many(
      Entity::Profile,
      &Filter::gte(ACTIVITY_FIELD, timestamp::encode(threshold)),
      &Mutation::inc(BALANCE_FIELD, i64::from(params.belly_per_active)),
    )
    .await?;

  tracing::info!(
    minutes = params.minutes,
    belly = params.belly_per_active,
    rewarded = result.modified,
    "reward tick"
  );

  Ok(Json(TickResponse {
    ok:       true,
    rewarded: result.modified,
    belly:    params.belly_per_active,
  }))
}

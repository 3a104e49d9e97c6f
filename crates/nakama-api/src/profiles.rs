//! Handler for `POST /nakama`.
//!
//! Handles are not checked for uniqueness: two profiles may share a
//! `username`.

use axum::{Json, extract::State};
use nakama_core::{CollectionMapper, Entity, store::DocumentStore, validate};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Body returned by every create endpoint.
#[derive(Debug, Serialize)]
pub struct Created {
  pub ok: bool,
  pub id: Uuid,
}

/// `POST /nakama`, body: a Profile document, e.g. `{"username":"luffy"}`.
pub async fn create<S>(
  State(mapper): State<CollectionMapper<S>>,
  Json(body): Json<Value>,
) -> Result<Json<Created>, ApiError>
where
  S: DocumentStore,
{
  let record = validate(Entity::Profile, &body)?;
  let id = mapper.store(record).await?;
  Ok(Json(Created { ok: true, id }))
}

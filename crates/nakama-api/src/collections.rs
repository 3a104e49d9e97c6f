//! Handlers for `/collections/{collection}`: create and list for any
//! registered entity.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/collections/{collection}` | Optional `?limit`; documents carry `_id` |
//! | `POST` | `/collections/{collection}` | Body validated against the entity; returns 201 |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use nakama_core::{
  CollectionMapper, Entity, Error,
  store::{Document, DocumentStore},
  validate,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, profiles::Created};

fn entity_for(collection: &str) -> Result<Entity, Error> {
  Entity::from_collection(collection).ok_or_else(|| Error::UnknownCollection(collection.to_owned()))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub limit: Option<usize>,
}

/// `GET /collections/{collection}[?limit=<n>]`
pub async fn list<S>(
  State(mapper): State<CollectionMapper<S>>,
  Path(collection): Path<String>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Document>>, ApiError>
where
  S: DocumentStore,
{
  let entity = entity_for(&collection)?;
  let documents = mapper.list(entity, params.limit).await?;
  Ok(Json(documents))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /collections/{collection}`, returns 201 + `{"ok":true,"id":...}`.
pub async fn create<S>(
  State(mapper): State<CollectionMapper<S>>,
  Path(collection): Path<String>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore,
{
  let entity = entity_for(&collection)?;
  let record = validate(entity, &body)?;
  let id = mapper.store(record).await?;
  Ok((StatusCode::CREATED, Json(Created { ok: true, id })))
}

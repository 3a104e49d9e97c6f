//! JSON REST API for Nakama OS.
//!
//! Exposes an axum [`Router`] backed by a [`CollectionMapper`] over any
//! [`DocumentStore`]. A mapper without a store still serves every route;
//! routes that need storage answer 500.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", nakama_api::api_router(mapper.clone()))
//! ```

pub mod collections;
pub mod error;
pub mod i18n;
pub mod profiles;
pub mod reward;

use axum::{
  Json, Router,
  routing::{get, post},
};
use nakama_core::{CollectionMapper, store::DocumentStore};
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `mapper`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(mapper: CollectionMapper<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    .route("/ping", get(ping))
    // Profiles
    .route("/nakama", post(profiles::create::<S>))
    // i18n
    .route("/i18n", get(i18n::handler::<S>))
    // Rewards
    .route("/reward/heartbeat", post(reward::heartbeat::<S>))
    .route("/reward/tick", post(reward::tick::<S>))
    // Any registered entity
    .route(
      "/collections/{collection}",
      get(collections::list::<S>).post(collections::create::<S>),
    )
    .with_state(mapper)
}

/// `GET /ping`
async fn ping() -> Json<Value> { Json(json!({ "pong": true })) }

#[cfg(test)]
mod tests;

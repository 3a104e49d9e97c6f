//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use nakama_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("invalid document: {0}")]
  Validation(#[from] ValidationError),

  #[error("database not configured")]
  StoreUnavailable,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<nakama_core::Error> for ApiError {
  fn from(e: nakama_core::Error) -> Self {
    use nakama_core::Error;
    match e {
      Error::Validation(v) => Self::Validation(v),
      Error::UnsupportedLanguage(_) => Self::BadRequest("Unsupported language".into()),
      Error::NotFound(m) => Self::NotFound(m),
      Error::UnknownCollection(c) => Self::NotFound(format!("unknown collection {c:?}")),
      Error::StoreUnavailable => Self::StoreUnavailable,
      Error::Store(e) => Self::Store(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, detail) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
      ApiError::StoreUnavailable => {
        (StatusCode::INTERNAL_SERVER_ERROR, "Database not configured".into())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "detail": detail }))).into_response()
  }
}

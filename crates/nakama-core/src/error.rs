//! Error types for `nakama-core`.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("unsupported language: {0:?}")]
  UnsupportedLanguage(String),

  #[error("{0}")]
  NotFound(String),

  #[error("unknown collection: {0:?}")]
  UnknownCollection(String),

  /// The store handle was never initialised.
  #[error("database not configured")]
  StoreUnavailable,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

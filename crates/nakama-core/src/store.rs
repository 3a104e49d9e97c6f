//! The `DocumentStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `nakama-store-sqlite`).
//! Higher layers go through [`CollectionMapper`](crate::mapper::CollectionMapper),
//! which resolves entities to collection names before calling in here.

use std::future::Future;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Key under which a document's identifier is reported by [`DocumentStore::find`].
pub const ID_FIELD: &str = "_id";

// ─── Query types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
  Eq,
  /// Greater than or equal. Strings compare lexicographically, which matches
  /// chronological order for stored timestamps.
  Gte,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
  pub field: String,
  pub op:    Op,
  pub value: Value,
}

/// A conjunction of field conditions. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
  pub conditions: Vec<Condition>,
}

impl Filter {
  pub fn all() -> Self { Self::default() }

  pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
    Self::all().and(field, Op::Eq, value)
  }

  pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
    Self::all().and(field, Op::Gte, value)
  }

  pub fn and(mut self, field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
    self.conditions.push(Condition {
      field: field.into(),
      op,
      value: value.into(),
    });
    self
  }
}

/// Which fields [`DocumentStore::find`] returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
  /// Every stored field plus [`ID_FIELD`].
  #[default]
  All,
  /// Only the listed fields; [`ID_FIELD`] only when listed. Fields missing
  /// from a document are omitted rather than reported as `null`.
  Include(Vec<String>),
}

impl Projection {
  pub fn include<I, S>(fields: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self::Include(fields.into_iter().map(Into::into).collect())
  }

  /// Shape a stored document for output.
  pub fn apply(&self, id: Uuid, mut document: Document) -> Document {
    match self {
      Self::All => {
        document.insert(ID_FIELD.to_owned(), Value::String(id.to_string()));
        document
      }
      Self::Include(fields) => {
        let mut out = Map::with_capacity(fields.len());
        for field in fields {
          if field == ID_FIELD {
            out.insert(field.clone(), Value::String(id.to_string()));
          } else if let Some(value) = document.remove(field) {
            out.insert(field.clone(), value);
          }
        }
        out
      }
    }
  }
}

/// A targeted field update.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
  Set { field: String, value: Value },
  /// Add `by` to an integer field; a missing or `null` field counts as 0.
  Inc { field: String, by: i64 },
}

impl Mutation {
  pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
    Self::Set { field: field.into(), value: value.into() }
  }

  pub fn inc(field: impl Into<String>, by: i64) -> Self {
    Self::Inc { field: field.into(), by }
  }
}

/// Outcome of an update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateResult {
  /// Documents selected by the filter.
  pub matched:  u64,
  /// Documents actually written.
  pub modified: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document database backend.
///
/// Collections are created implicitly by the first insert. Documents are
/// never deleted.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Display name of the underlying database.
  fn name(&self) -> &str;

  /// Persist `document` in `collection` and return its generated identifier.
  fn insert<'a>(
    &'a self,
    collection: &'a str,
    document: Document,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + 'a;

  /// Documents of `collection` matching `filter`, in insertion order, at most
  /// `limit` of them.
  fn find<'a>(
    &'a self,
    collection: &'a str,
    filter: &'a Filter,
    projection: &'a Projection,
    limit: Option<usize>,
  ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send + 'a;

  /// Apply `mutation` to the first document matching `filter`.
  fn update_one<'a>(
    &'a self,
    collection: &'a str,
    filter: &'a Filter,
    mutation: &'a Mutation,
  ) -> impl Future<Output = Result<UpdateResult, Self::Error>> + Send + 'a;

  /// Apply `mutation` to every document matching `filter`.
  fn update_many<'a>(
    &'a self,
    collection: &'a str,
    filter: &'a Filter,
    mutation: &'a Mutation,
  ) -> impl Future<Output = Result<UpdateResult, Self::Error>> + Send + 'a;

  /// Names of the collections that currently hold documents, sorted.
  fn collection_names(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}

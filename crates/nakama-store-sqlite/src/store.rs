//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::{path::Path, sync::Arc};

use nakama_core::store::{
  Document, DocumentStore, Filter, Mutation, Projection, UpdateResult,
};
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    Params, decode_body, decode_uuid, encode_body, encode_uuid, mutation_guard_sql, mutation_sql,
    where_sql,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by a single SQLite file.
///
/// The inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
  name: Arc<str>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation. The
  /// store is named after the file stem.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let name = path
      .file_stem()
      .map(|stem| stem.to_string_lossy().into_owned())
      .unwrap_or_else(|| path.display().to_string());
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, name: name.into() };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, name: "memory".into() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Override the display name reported by [`DocumentStore::name`].
  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    let name: String = name.into();
    self.name = Arc::from(name);
    self
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `UPDATE documents SET body = <mutation> WHERE <build_where>` and
  /// report the number of rows written. Rows the mutation cannot apply to
  /// (see [`mutation_guard_sql`]) are skipped.
  async fn update(
    &self,
    mutation: &Mutation,
    build_where: impl FnOnce(&mut Params) -> Result<String>,
  ) -> Result<UpdateResult> {
    let mut params = Params::default();
    let set = mutation_sql(mutation, &mut params)?;
    let mut selection = build_where(&mut params)?;
    if let Some(guard) = mutation_guard_sql(mutation, &mut params)? {
      selection = format!("({selection}) AND {guard}");
    }
    let sql = format!("UPDATE documents SET body = {set} WHERE {selection}");
    let values = params.into_values();

    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?))
      .await?;

    let changed = changed as u64;
    Ok(UpdateResult { matched: changed, modified: changed })
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  fn name(&self) -> &str { &self.name }

  async fn insert(&self, collection: &str, document: Document) -> Result<Uuid> {
    let id = Uuid::new_v4();

    let id_str     = encode_uuid(id);
    let collection = collection.to_owned();
    let body       = encode_body(&document)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO documents (doc_id, collection, body) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, collection, body],
        )?;
        Ok(())
      })
      .await?;

    Ok(id)
  }

  async fn find(
    &self,
    collection: &str,
    filter: &Filter,
    projection: &Projection,
    limit: Option<usize>,
  ) -> Result<Vec<Document>> {
    let mut params = Params::default();
    let selection = where_sql(collection, filter, &mut params)?;
    // SQLite treats a negative LIMIT as "no limit".
    let limit = params.bind(limit.map_or(-1, |l| l as i64));
    let sql = format!(
      "SELECT doc_id, body FROM documents WHERE {selection} ORDER BY rowid LIMIT {limit}"
    );
    let values = params.into_values();

    let rows: Vec<(String, String)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(id_str, body)| {
        let id = decode_uuid(&id_str)?;
        Ok(projection.apply(id, decode_body(id, &body)?))
      })
      .collect()
  }

  async fn update_one(
    &self,
    collection: &str,
    filter: &Filter,
    mutation: &Mutation,
  ) -> Result<UpdateResult> {
    self
      .update(mutation, |params| {
        let selection = where_sql(collection, filter, params)?;
        Ok(format!(
          "doc_id = (SELECT doc_id FROM documents WHERE {selection} ORDER BY rowid LIMIT 1)"
        ))
      })
      .await
  }

  async fn update_many(
    &self,
    collection: &str,
    filter: &Filter,
    mutation: &Mutation,
  ) -> Result<UpdateResult> {
    self
      .update(mutation, |params| where_sql(collection, filter, params))
      .await
  }

  async fn collection_names(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT DISTINCT collection FROM documents ORDER BY collection")?;
        let names = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
      })
      .await?;
    Ok(names)
  }
}

//! [`CollectionMapper`] — entity-level access to a [`DocumentStore`].

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  entity::Entity,
  store::{Document, DocumentStore, Filter, Mutation, Projection, UpdateResult},
  validate::ValidatedRecord,
};

/// Resolves entities to their collections and forwards to the store.
///
/// The store handle is optional: a mapper built without one fails every
/// operation with [`Error::StoreUnavailable`] instead of reaching storage.
pub struct CollectionMapper<S> {
  store: Option<Arc<S>>,
}

impl<S> Clone for CollectionMapper<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S> CollectionMapper<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store: Some(store) } }

  /// A mapper with no store behind it.
  pub fn unavailable() -> Self { Self { store: None } }

  pub fn from_option(store: Option<Arc<S>>) -> Self { Self { store } }

  pub fn is_available(&self) -> bool { self.store.is_some() }
}

impl<S: DocumentStore> CollectionMapper<S> {
  /// The store handle, or [`Error::StoreUnavailable`].
  pub fn handle(&self) -> Result<&S> {
    self.store.as_deref().ok_or(Error::StoreUnavailable)
  }

  /// Insert a validated record into its entity's collection.
  pub async fn store(&self, record: ValidatedRecord) -> Result<Uuid> {
    let store = self.handle()?;
    let collection = record.entity().collection();
    let id = store
      .insert(collection, record.into_document())
      .await
      .map_err(Error::store)?;
    tracing::debug!(collection, %id, "inserted document");
    Ok(id)
  }

  pub async fn query(
    &self,
    entity: Entity,
    filter: &Filter,
    projection: &Projection,
  ) -> Result<Vec<Document>> {
    let store = self.handle()?;
    store
      .find(entity.collection(), filter, projection, None)
      .await
      .map_err(Error::store)
  }

  /// Every document of `entity`, up to `limit`.
  pub async fn list(&self, entity: Entity, limit: Option<usize>) -> Result<Vec<Document>> {
    let store = self.handle()?;
    store
      .find(entity.collection(), &Filter::all(), &Projection::All, limit)
      .await
      .map_err(Error::store)
  }

  pub async fn update_one(
    &self,
    entity: Entity,
    filter: &Filter,
    mutation: &Mutation,
  ) -> Result<UpdateResult> {
    let store = self.handle()?;
    let result = store
      .update_one(entity.collection(), filter, mutation)
      .await
      .map_err(Error::store)?;
    tracing::debug!(collection = entity.collection(), ?result, "update_one");
    Ok(result)
  }

  pub async fn update_many(
    &self,
    entity: Entity,
    filter: &Filter,
    mutation: &Mutation,
  ) -> Result<UpdateResult> {
    let store = self.handle()?;
    let result = store
      .update_many(entity.collection(), filter, mutation)
      .await
      .map_err(Error::store)?;
    tracing::debug!(collection = entity.collection(), ?result, "update_many");
    Ok(result)
  }

  pub async fn collection_names(&self) -> Result<Vec<String>> {
    self.handle()?.collection_names().await.map_err(Error::store)
  }
}

//! Core types and trait definitions for the Nakama OS backend.
//!
//! Holds the schema registry, record validation, the entity → collection
//! table and the [`DocumentStore`](store::DocumentStore) abstraction. This
//! crate is free of HTTP and database dependencies; the store backends and
//! the API layer depend on it.

// Native `async fn` in traits; the `Send` bounds are spelled out on each
// method's returned future instead.
#![allow(async_fn_in_trait)]

pub mod entity;
pub mod error;
pub mod language;
pub mod mapper;
pub mod model;
pub mod schema;
pub mod status;
pub mod store;
pub mod timestamp;
pub mod validate;

pub use entity::Entity;
pub use error::{Error, Result};
pub use mapper::CollectionMapper;
pub use validate::{ValidatedRecord, ValidationError, validate};

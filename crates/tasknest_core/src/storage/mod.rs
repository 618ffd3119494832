//! Durable key-value persistence port and its implementations.
//!
//! # Responsibility
//! - Define the `get`/`set` contract the store persists through.
//! - Provide an in-memory backend for tests and a SQLite backend for
//!   production.
//! - Encode and validate the JSON array payloads stored under each key.
//!
//! # Invariants
//! - Only two keys are ever written: [`PROJECTS_KEY`] and [`TODOS_KEY`].
//! - Each value is the full serialized collection, never a delta.

pub mod codec;
pub mod kv_store;
pub mod sqlite_kv;

/// Key holding the serialized project collection.
pub const PROJECTS_KEY: &str = "projects";
/// Key holding the serialized todo collection.
pub const TODOS_KEY: &str = "todos";

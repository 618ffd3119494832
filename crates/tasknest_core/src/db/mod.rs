//! SQLite bootstrap for the durable key-value backing store.
//!
//! Opening a connection applies every pending migration before it is handed
//! to `SqliteKeyValueStore`. Failures surface as `KvError::Sqlite` or
//! `KvError::SchemaTooNew`.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

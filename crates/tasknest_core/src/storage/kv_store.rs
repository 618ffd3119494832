//! Key-value store contract and in-memory implementation.
//!
//! # Invariants
//! - `get` returns `Ok(None)` for absent keys, never an error.
//! - A failed `set` leaves the previous value for that key untouched.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type KvResult<T> = Result<T, KvError>;

/// Failure reported by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    /// SQLite statement or connection failure.
    Sqlite(rusqlite::Error),
    /// Database file was written by a newer build than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// Backend refused the operation (closed, read-only, switched off).
    Unavailable(String),
    /// Write would exceed the backend's byte budget.
    QuotaExceeded {
        key: String,
        attempted_bytes: usize,
        limit_bytes: usize,
    },
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "key-value schema version {found} is newer than supported {supported}"
            ),
            Self::Unavailable(reason) => write!(f, "storage unavailable: {reason}"),
            Self::QuotaExceeded {
                key,
                attempted_bytes,
                limit_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {attempted_bytes} bytes, limit {limit_bytes}"
            ),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::Unavailable(_) | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String-keyed durable storage used by the store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> KvResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        (**self).set(key, value)
    }
}

/// `HashMap`-backed store with optional quota and failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps total stored bytes (keys plus values) like a browser quota.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Seeds a raw value without going through quota checks.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Makes every subsequent `set` fail with `KvError::Unavailable`.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        if self.unavailable {
            return Err(KvError::Unavailable("memory store switched off".to_string()));
        }

        if let Some(limit_bytes) = self.quota_bytes {
            let attempted_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if attempted_bytes > limit_bytes {
                return Err(KvError::QuotaExceeded {
                    key: key.to_string(),
                    attempted_bytes,
                    limit_bytes,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, KvError, MemoryKeyValueStore};

    #[test]
    fn absent_key_reads_as_none() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("projects").expect("get"), None);
    }

    #[test]
    fn set_overwrites_previous_value() {
        let mut store = MemoryKeyValueStore::new();
        store.set("todos", "[]").expect("first set");
        store.set("todos", "[1]").expect("second set");
        assert_eq!(store.raw("todos"), Some("[1]"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryKeyValueStore::with_quota(16);
        store.set("k", "small").expect("fits");

        let err = store.set("k", "much too large for quota").expect_err("over quota");
        assert!(matches!(err, KvError::QuotaExceeded { limit_bytes: 16, .. }));
        assert_eq!(store.raw("k"), Some("small"));
    }

    #[test]
    fn quota_counts_replacement_not_sum_of_versions() {
        let mut store = MemoryKeyValueStore::with_quota(10);
        store.set("k", "12345678").expect("fits");
        store.set("k", "87654321").expect("replacement fits too");
    }

    #[test]
    fn unavailable_store_rejects_writes() {
        let mut store = MemoryKeyValueStore::new();
        store.set_unavailable(true);
        let err = store.set("k", "v").expect_err("switched off");
        assert!(err.to_string().contains("unavailable"));
        assert!(store.is_empty());
    }
}

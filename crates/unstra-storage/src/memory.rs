//! In-memory waitlist store.
//!
//! Stores all entries in a `BTreeMap` keyed by email behind a `RwLock`. It
//! is not persistent — all signups are lost when the process exits. Use
//! this for local development and tests.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{NewEntry, StorageError, StoredEntry, WaitlistStore};

/// An in-memory waitlist store backed by a `BTreeMap`.
///
/// Clones share the same underlying map.
///
/// # Examples
///
/// ```
/// # use unstra_storage::{MemoryStore, NewEntry, WaitlistStore};
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let entry = NewEntry {
///     email: "ada@example.com".to_owned(),
///     source: "direct".to_owned(),
///     user_agent: "curl/8.0".to_owned(),
/// };
/// store.insert(&entry).await.unwrap();
/// assert_eq!(store.count().await.unwrap(), 1);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, StoredEntry>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl WaitlistStore for MemoryStore {
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&entry.email) {
            return Err(StorageError::Conflict {
                email: entry.email.clone(),
            });
        }
        entries.insert(entry.email.clone(), StoredEntry::stamp(entry));
        Ok(())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.len() as u64)
    }

    async fn find(&self, email: &str) -> Result<Option<StoredEntry>, StorageError> {
        let entries = self.entries.read().await;
        Ok(entries.get(email).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

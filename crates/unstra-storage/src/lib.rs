//! Storage backend abstraction for the Unstra waitlist.
//!
//! This crate defines the [`WaitlistStore`] trait — a keyed-record store
//! for waitlist signups. It knows nothing about forms, sources, or pages.
//! The store alone enforces the one-entry-per-email invariant; callers learn
//! about a repeat signup through [`StorageError::Conflict`].
//!
//! Three implementations are provided:
//!
//! - [`MemoryStore`] — in-memory, for development and tests
//! - [`RedbStore`] — pure-Rust embedded store (feature `redb-backend`)
//! - [`PostgresStore`] — hosted `PostgreSQL` table (feature `postgres-backend`)

mod error;
mod memory;
#[cfg(feature = "postgres-backend")]
mod postgres_backend;
#[cfg(feature = "redb-backend")]
mod redb_backend;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres-backend")]
pub use postgres_backend::PostgresStore;
#[cfg(feature = "redb-backend")]
pub use redb_backend::RedbStore;

/// A signup as handed to the store. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Normalized email address. Unique across the waitlist.
    pub email: String,
    /// Where the signup came from (`linkedin` or `direct`).
    pub source: String,
    /// User agent of the submitting client.
    pub user_agent: String,
}

/// A signup as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    pub id: Uuid,
    pub email: String,
    pub source: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Stamp a new entry with a fresh id and the current time.
    #[must_use]
    pub fn stamp(entry: &NewEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: entry.email.clone(),
            source: entry.source.clone(),
            user_agent: entry.user_agent.clone(),
            created_at: Utc::now(),
        }
    }
}

/// A pluggable waitlist store.
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
#[async_trait::async_trait]
pub trait WaitlistStore: Send + Sync + 'static {
    /// Insert a new signup.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if an entry with the same email
    /// already exists, or another variant if the backend fails.
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError>;

    /// Count all stored signups.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn count(&self) -> Result<u64, StorageError>;

    /// Look up a signup by its email.
    ///
    /// Returns `Ok(None)` if no entry exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Read`] if the underlying backend fails.
    async fn find(&self, email: &str) -> Result<Option<StoredEntry>, StorageError>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

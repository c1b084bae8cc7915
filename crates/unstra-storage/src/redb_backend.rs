//! Pure-Rust redb waitlist store.
//!
//! For single-node deployments that want persistence without running a
//! database server. Feature-gated behind `redb-backend`.
//!
//! Entries live in one table keyed by email, values are JSON-encoded
//! [`StoredEntry`] records. The existence check and the write share one
//! write transaction, so two racing inserts of the same email cannot both
//! succeed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};

use crate::{NewEntry, StorageError, StoredEntry, WaitlistStore};

const WAITLIST_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("waitlist");

/// A waitlist store backed by redb.
///
/// Blocking redb calls are offloaded to the Tokio blocking thread pool.
///
/// # Examples
///
/// ```no_run
/// # use unstra_storage::RedbStore;
/// let store = RedbStore::open("./data/waitlist.redb").unwrap();
/// ```
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    path: PathBuf,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if redb fails to open or create the
    /// database file, or [`StorageError::Transaction`] if the table cannot
    /// be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|e| StorageError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // Opening the table in a write txn creates it if missing.
        let txn = db.begin_write().map_err(|e| StorageError::Transaction {
            reason: e.to_string(),
        })?;
        {
            let _table = txn
                .open_table(WAITLIST_TABLE)
                .map_err(|e| StorageError::Open {
                    path: path.display().to_string(),
                    reason: format!("waitlist table: {e}"),
                })?;
        }
        txn.commit().map_err(|e| StorageError::Transaction {
            reason: e.to_string(),
        })?;

        Ok(Self {
            db: Arc::new(db),
            path: path.to_path_buf(),
        })
    }
}

fn read_error(what: &str, e: impl std::fmt::Display) -> StorageError {
    StorageError::Read {
        what: what.to_owned(),
        reason: e.to_string(),
    }
}

#[async_trait::async_trait]
impl WaitlistStore for RedbStore {
    #[tracing::instrument(skip_all, fields(backend = "redb"))]
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError> {
        let db = Arc::clone(&self.db);
        let stored = StoredEntry::stamp(entry);
        let encoded = serde_json::to_vec(&stored).map_err(|e| StorageError::Encoding {
            reason: e.to_string(),
        })?;

        tokio::task::spawn_blocking(move || {
            let write_error = |e: &dyn std::fmt::Display| StorageError::Write {
                email: stored.email.clone(),
                reason: e.to_string(),
            };

            let txn = db.begin_write().map_err(|e| StorageError::Transaction {
                reason: e.to_string(),
            })?;
            {
                let mut table = txn.open_table(WAITLIST_TABLE).map_err(|e| write_error(&e))?;
                let exists = table
                    .get(stored.email.as_str())
                    .map_err(|e| write_error(&e))?
                    .is_some();
                if exists {
                    return Err(StorageError::Conflict {
                        email: stored.email.clone(),
                    });
                }
                table
                    .insert(stored.email.as_str(), encoded.as_slice())
                    .map_err(|e| write_error(&e))?;
            }
            txn.commit().map_err(|e| StorageError::Transaction {
                reason: e.to_string(),
            })?;
            Ok(())
        })
        .await
        .map_err(|e| StorageError::Transaction {
            reason: format!("blocking task panicked: {e}"),
        })?
    }

    #[tracing::instrument(skip_all, fields(backend = "redb"))]
    async fn count(&self) -> Result<u64, StorageError> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let txn = db.begin_read().map_err(|e| StorageError::Transaction {
                reason: e.to_string(),
            })?;
            let table = txn
                .open_table(WAITLIST_TABLE)
                .map_err(|e| read_error("waitlist", e))?;
            table.len().map_err(|e| read_error("waitlist", e))
        })
        .await
        .map_err(|e| read_error("waitlist", format!("blocking task panicked: {e}")))?
    }

    #[tracing::instrument(skip_all, fields(backend = "redb"))]
    async fn find(&self, email: &str) -> Result<Option<StoredEntry>, StorageError> {
        let db = Arc::clone(&self.db);
        let email = email.to_owned();
        tokio::task::spawn_blocking(move || {
            let txn = db.begin_read().map_err(|e| StorageError::Transaction {
                reason: e.to_string(),
            })?;
            let table = txn
                .open_table(WAITLIST_TABLE)
                .map_err(|e| read_error(&email, e))?;
            let Some(raw) = table.get(email.as_str()).map_err(|e| read_error(&email, e))? else {
                return Ok(None);
            };
            let entry = serde_json::from_slice::<StoredEntry>(raw.value()).map_err(|e| {
                StorageError::Encoding {
                    reason: format!("entry for '{email}': {e}"),
                }
            })?;
            Ok(Some(entry))
        })
        .await
        .map_err(|e| read_error("waitlist", format!("blocking task panicked: {e}")))?
    }

    fn backend_name(&self) -> &'static str {
        "redb"
    }
}

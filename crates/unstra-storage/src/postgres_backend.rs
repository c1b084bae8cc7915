//! `PostgreSQL` waitlist store.
//!
//! Stores signups in a single `waitlist` table with a unique constraint on
//! `email`. Feature-gated behind `postgres-backend`. Uses `sqlx` with the
//! Tokio runtime for fully async operations.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::{NewEntry, StorageError, StoredEntry, WaitlistStore};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// A waitlist store backed by `PostgreSQL`.
///
/// # Examples
///
/// ```no_run
/// # use unstra_storage::PostgresStore;
/// # #[tokio::main]
/// # async fn main() {
/// let store = PostgresStore::connect("postgres://localhost/unstra").await.unwrap();
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStore")
            .field("pool", &"[PgPool]")
            .finish_non_exhaustive()
    }
}

#[derive(sqlx::FromRow)]
struct WaitlistRow {
    id: uuid::Uuid,
    email: String,
    source: String,
    user_agent: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<WaitlistRow> for StoredEntry {
    fn from(row: WaitlistRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            source: row.source,
            user_agent: row.user_agent,
            created_at: row.created_at,
        }
    }
}

impl PostgresStore {
    /// Connect to `PostgreSQL` and create the `waitlist` table if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the connection or migration fails.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StorageError::Open {
                path: "[redacted]".to_owned(),
                reason: e.to_string(),
            })?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS waitlist (\
                id         UUID        PRIMARY KEY, \
                email      TEXT        NOT NULL UNIQUE, \
                source     TEXT        NOT NULL, \
                user_agent TEXT        NOT NULL, \
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
            )",
        )
        .execute(&pool)
        .await
        .map_err(|e| StorageError::Open {
            path: "[redacted]".to_owned(),
            reason: format!("migration failed: {e}"),
        })?;

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl WaitlistStore for PostgresStore {
    #[tracing::instrument(skip_all, fields(backend = "postgres"))]
    async fn insert(&self, entry: &NewEntry) -> Result<(), StorageError> {
        let stored = StoredEntry::stamp(entry);
        sqlx::query(
            "INSERT INTO waitlist (id, email, source, user_agent, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(stored.id)
        .bind(&stored.email)
        .bind(&stored.source)
        .bind(&stored.user_agent)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                StorageError::Conflict {
                    email: entry.email.clone(),
                }
            }
            _ => StorageError::Write {
                email: entry.email.clone(),
                reason: e.to_string(),
            },
        })?;

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(backend = "postgres"))]
    async fn count(&self) -> Result<u64, StorageError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM waitlist")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::Read {
                what: "waitlist".to_owned(),
                reason: e.to_string(),
            })?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[tracing::instrument(skip_all, fields(backend = "postgres"))]
    async fn find(&self, email: &str) -> Result<Option<StoredEntry>, StorageError> {
        let row = sqlx::query_as::<_, WaitlistRow>(
            "SELECT id, email, source, user_agent, created_at FROM waitlist WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Read {
            what: email.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(row.map(StoredEntry::from))
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

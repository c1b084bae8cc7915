//! Storage error types.
//!
//! Every variant carries enough context to diagnose the problem without a
//! debugger. A uniqueness violation gets its own variant so callers can tell
//! a repeat signup apart from a broken store.

/// Errors that can occur during waitlist storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open or connect to the store.
    #[error("failed to open storage at '{path}': {reason}")]
    Open { path: String, reason: String },

    /// Failed to read from the store.
    #[error("failed to read '{what}': {reason}")]
    Read { what: String, reason: String },

    /// Failed to write an entry.
    #[error("failed to write entry for '{email}': {reason}")]
    Write { email: String, reason: String },

    /// An entry with this email already exists.
    #[error("an entry for '{email}' already exists")]
    Conflict { email: String },

    /// A stored value could not be encoded or decoded.
    #[error("invalid stored value: {reason}")]
    Encoding { reason: String },

    /// Failed to begin or commit a transaction.
    #[error("transaction failed: {reason}")]
    Transaction { reason: String },
}

impl StorageError {
    /// Whether this error is a uniqueness violation on the email column.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

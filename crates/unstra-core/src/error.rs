//! Error types for `unstra-core`.
//!
//! [`SignupError`] is the signup taxonomy: a bad address, a repeat signup,
//! or a store that could not be reached. Only the last one says anything
//! about the health of the system.

use unstra_storage::StorageError;

/// Errors from a waitlist submission.
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    /// The submitted address is not a syntactically valid email.
    #[error("invalid email address: {reason}")]
    Validation { reason: String },

    /// The address is already on the waitlist.
    #[error("'{email}' is already on the waitlist")]
    Conflict { email: String },

    /// The store failed for a reason other than uniqueness.
    #[error("waitlist store unavailable: {0}")]
    Transient(#[source] StorageError),
}

impl SignupError {
    /// Message that is safe to show to the person who submitted the form.
    ///
    /// Store internals never leak into it.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { reason } => format!("Please enter a valid email address ({reason})."),
            Self::Conflict { .. } => "You're already on the list! We'll be in touch soon.".to_owned(),
            Self::Transient(_) => "Please try again later.".to_owned(),
        }
    }
}

impl From<StorageError> for SignupError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict { email } => Self::Conflict { email },
            other => Self::Transient(other),
        }
    }
}

/// Errors from cohort progress configuration.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// The meter parameters cannot produce a sane percentage.
    #[error("invalid progress config: {reason}")]
    InvalidConfig { reason: String },
}

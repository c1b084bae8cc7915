//! Waitlist signup handling.
//!
//! [`Waitlist::submit`] takes one email address from one form instance,
//! inserts it into the store, and tells the caller where to send the user.
//! A repeat signup is not an error for the user: it routes to the same
//! confirmation view as a fresh one.

use std::sync::Arc;

use tracing::{debug, info, warn};
use unstra_storage::WaitlistStore;

use crate::entry::{EmailAddress, Source, WaitlistEntry};
use crate::error::SignupError;
use crate::gate::InFlight;

/// Path of the confirmation view.
pub const CONFIRMATION_PATH: &str = "/thanks";

/// What the form sent, plus what the request says about the client.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    /// Raw address as typed.
    pub email: String,
    /// URL (or path and query) of the page the form was submitted from.
    pub page_url: Option<String>,
    /// Client user agent, if the request carried one.
    pub user_agent: Option<String>,
}

/// Result of a settled submission.
#[derive(Debug)]
pub enum Outcome {
    /// The address was added.
    Joined,
    /// The address was already on the list.
    AlreadyJoined,
    /// Anything else. The form stays usable for a retry.
    Failed(SignupError),
}

impl Outcome {
    /// Where to send the user next. `None` keeps them on the landing page.
    #[must_use]
    pub const fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::Joined | Self::AlreadyJoined => Some(CONFIRMATION_PATH),
            Self::Failed(_) => None,
        }
    }

    /// Inline notice to show before (or instead of) navigating.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Joined => None,
            Self::AlreadyJoined => {
                Some("You're already on the list! We'll be in touch soon.".to_owned())
            }
            Self::Failed(err) => Some(format!("Something went wrong: {}", err.public_message())),
        }
    }

    /// Stable machine-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Joined => "joined",
            Self::AlreadyJoined => "already_joined",
            Self::Failed(_) => "failed",
        }
    }
}

/// The signup form handler.
///
/// Cheap to clone; clones share the store and the in-flight gate.
#[derive(Clone)]
pub struct Waitlist {
    store: Arc<dyn WaitlistStore>,
    in_flight: InFlight,
}

impl std::fmt::Debug for Waitlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waitlist")
            .field("store", &self.store.backend_name())
            .finish_non_exhaustive()
    }
}

impl Waitlist {
    #[must_use]
    pub fn new(store: Arc<dyn WaitlistStore>) -> Self {
        Self {
            store,
            in_flight: InFlight::new(),
        }
    }

    /// Submit one address on behalf of the form instance `form_id`.
    ///
    /// Returns `None` without touching the store if a submission for
    /// `form_id` is already in flight. Otherwise returns the settled
    /// outcome; by then the form instance is free again whatever happened.
    pub async fn submit(&self, form_id: &str, submission: Submission) -> Option<Outcome> {
        let Some(_guard) = self.in_flight.try_acquire(form_id) else {
            debug!(form_id, "submission already in flight, ignoring");
            return None;
        };
        Some(self.register(submission).await)
    }

    /// Whether `form_id` currently has a submission in flight.
    #[must_use]
    pub fn is_in_flight(&self, form_id: &str) -> bool {
        self.in_flight.is_in_flight(form_id)
    }

    /// Number of signups so far.
    ///
    /// # Errors
    ///
    /// Returns [`SignupError::Transient`] if the store cannot be read.
    pub async fn count(&self) -> Result<u64, SignupError> {
        self.store.count().await.map_err(SignupError::Transient)
    }

    /// Name of the backing store.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    async fn register(&self, submission: Submission) -> Outcome {
        let email = match EmailAddress::parse(&submission.email) {
            Ok(email) => email,
            Err(err) => {
                debug!(error = %err, "rejected waitlist submission");
                return Outcome::Failed(err);
            }
        };
        let source = Source::from_page_url(submission.page_url.as_deref());
        let entry = WaitlistEntry::new(email, source, submission.user_agent.as_deref());

        match self.store.insert(&entry.to_new_entry()).await {
            Ok(()) => {
                info!(email_domain = %entry.email.domain(), %source, "joined waitlist");
                Outcome::Joined
            }
            Err(err) => match SignupError::from(err) {
                SignupError::Conflict { .. } => {
                    info!(email_domain = %entry.email.domain(), %source, "already on waitlist");
                    Outcome::AlreadyJoined
                }
                err => {
                    warn!(error = %err, email_domain = %entry.email.domain(), "waitlist signup failed");
                    Outcome::Failed(err)
                }
            },
        }
    }
}

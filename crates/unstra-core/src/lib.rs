//! Core library for the Unstra waitlist.
//!
//! Contains the signup form handler, email and source attribution rules,
//! the in-flight submission gate, and the founding-cohort progress meter.
//! This crate depends on `unstra-storage` for the store trait and knows
//! nothing about HTTP or HTML.

pub mod entry;
pub mod error;
pub mod gate;
pub mod progress;
pub mod signup;

pub use entry::{EmailAddress, Source, UNKNOWN_USER_AGENT, WaitlistEntry};
pub use error::{ProgressError, SignupError};
pub use gate::{InFlight, InFlightGuard};
pub use progress::CohortMeter;
pub use signup::{CONFIRMATION_PATH, Outcome, Submission, Waitlist};

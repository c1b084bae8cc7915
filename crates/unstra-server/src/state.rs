//! Shared application state for the Unstra server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`.

use unstra_core::{CohortMeter, Waitlist};

use crate::config::SiteConfig;

/// Shared application state passed to all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Signup handler and its store.
    pub waitlist: Waitlist,
    /// Founding-cohort progress meter.
    pub meter: CohortMeter,
    /// Public-facing site settings.
    pub site: SiteConfig,
}

impl AppState {
    /// Signup count for display. A failed read shows as zero.
    pub async fn display_count(&self) -> u64 {
        self.waitlist.count().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to count waitlist, showing zero");
            0
        })
    }
}

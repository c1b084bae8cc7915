//! Unstra landing page server.
//!
//! Wires together the signup handler, waitlist store, and HTTP routes into
//! a running Axum server. Serves the marketing pages at `/` and `/thanks`,
//! the waitlist form at `/waitlist`, and a small JSON API at `/api/*`.

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

//! In-flight submission gate.
//!
//! A form instance may have at most one submission in flight. Acquiring the
//! gate yields an [`InFlightGuard`]; dropping the guard releases the key on
//! every exit path, including early returns, panics, and futures that are
//! dropped before completion.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Set of keys (form instances) with a submission currently in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`. Returns `None` if a submission for it is already in flight.
    #[must_use]
    pub fn try_acquire(&self, key: &str) -> Option<InFlightGuard> {
        if !self.lock().insert(key.to_owned()) {
            return None;
        }
        Some(InFlightGuard {
            keys: Arc::clone(&self.keys),
            key: key.to_owned(),
        })
    }

    /// Whether a submission for `key` is currently in flight.
    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    // The critical sections never panic, but recover anyway so a poisoned
    // lock cannot leave every form disabled.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its key when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

//! # Exponential Backoff
//!
//! Requeue delays for failed reconcile passes.
//! Each resource gets its own sequence: min, 2*min, 4*min, ... capped at max,
//! restarting from min after the next successful pass.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Exponential backoff calculator
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    /// Minimum backoff value in seconds (for reset)
    min_seconds: u64,
    /// Current backoff value in seconds
    current_seconds: u64,
    /// Maximum backoff value in seconds
    max_seconds: u64,
}

impl ExponentialBackoff {
    /// Create a new backoff. `min_seconds` of zero is treated as one.
    #[must_use]
    pub fn new(min_seconds: u64, max_seconds: u64) -> Self {
        let min_seconds = min_seconds.max(1);
        Self {
            min_seconds,
            current_seconds: min_seconds,
            max_seconds: max_seconds.max(min_seconds),
        }
    }

    /// Get the next backoff duration in seconds and advance the sequence
    pub fn next_backoff_seconds(&mut self) -> u64 {
        let result = self.current_seconds;
        self.current_seconds = self
            .current_seconds
            .saturating_mul(2)
            .min(self.max_seconds);
        result
    }

    #[must_use]
    pub fn next_backoff(&mut self) -> Duration {
        Duration::from_secs(self.next_backoff_seconds())
    }

    /// Reset the backoff to the initial state
    pub fn reset(&mut self) {
        self.current_seconds = self.min_seconds;
    }
}

/// Backoff state for a resource
#[derive(Debug, Clone)]
struct BackoffState {
    backoff: ExponentialBackoff,
    error_count: u32,
}

/// Per-resource backoff, keyed by `namespace/name`
#[derive(Debug)]
pub struct BackoffTracker {
    min_seconds: u64,
    max_seconds: u64,
    states: Mutex<HashMap<String, BackoffState>>,
}

impl BackoffTracker {
    pub fn new(min_seconds: u64, max_seconds: u64) -> Self {
        Self {
            min_seconds,
            max_seconds,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Record a failure for `key` and return the delay before the next attempt
    /// together with the consecutive error count
    pub fn next(&self, key: &str) -> (Duration, u32) {
        let mut states = self.states.lock().unwrap_or_else(PoisonError::into_inner);
        let state = states.entry(key.to_string()).or_insert_with(|| BackoffState {
            backoff: ExponentialBackoff::new(self.min_seconds, self.max_seconds),
            error_count: 0,
        });
        state.error_count += 1;
        (state.backoff.next_backoff(), state.error_count)
    }

    /// Forget the failure history of `key` after a successful pass
    pub fn reset(&self, key: &str) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

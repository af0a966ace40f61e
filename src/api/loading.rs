//! In-flight request tracking.
//!
//! Each HTTP client owns a [`LoadingCounter`]; views poll it to decide
//! whether a spinner should be shown. The counter increments when a request
//! starts and decrements when the guard drops, so it is balanced on every
//! exit path including errors and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of requests currently in flight.
///
/// Cloning is cheap and every clone observes the same count.
#[derive(Debug, Clone, Default)]
pub struct LoadingCounter(Arc<AtomicUsize>);

impl LoadingCounter {
    /// Creates a counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request start. The count drops again when the returned
    /// guard goes out of scope.
    #[must_use]
    pub fn begin(&self) -> LoadingGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        LoadingGuard(Arc::clone(&self.0))
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Whether any request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }
}

/// Decrements the owning counter on drop.
#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicUsize>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

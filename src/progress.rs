//! Progress snapshots and cooperative cancellation.
//!
//! The batch worker is the single writer; the polling caller is the
//! single reader. Progress is a snapshot value, not a structure both
//! sides mutate, so a plain `Mutex` around a small struct is all the
//! coordination needed.

use serde::Serialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation flag, checked between pipeline stages and
/// between files. Never forces termination mid-write.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Point-in-time view of a running batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    /// 0-100. Updated after each completed file.
    pub percent: f64,
    /// File currently being converted, published before its conversion
    /// starts.
    pub current_file: Option<String>,
    /// Files completed so far.
    pub processed: usize,
    pub total: usize,
}

/// Written by the batch worker, read by the poller.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    state: Mutex<ProgressSnapshot>,
    cancel: CancelFlag,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProgressSnapshot> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.lock().clone()
    }

    /// Reset for a batch of `total` files.
    pub fn start(&self, total: usize) {
        *self.lock() = ProgressSnapshot {
            total,
            ..ProgressSnapshot::default()
        };
    }

    /// Publish the file about to be converted.
    pub fn begin_file(&self, name: &str) {
        self.lock().current_file = Some(name.to_string());
    }

    /// Record one completed file and advance the percentage.
    pub fn file_done(&self) {
        let mut state = self.lock();
        state.processed += 1;
        if state.total > 0 {
            state.percent = state.processed as f64 / state.total as f64 * 100.0;
        }
    }

    /// Force the bar to 100% (used when there is nothing to do).
    pub fn complete(&self) {
        self.lock().percent = 100.0;
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }
}

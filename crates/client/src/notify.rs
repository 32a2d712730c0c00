// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery of notification intents to the presentation layer.
//!
//! The client never renders anything. It hands each [`NotificationIntent`]
//! to every registered [`Presenter`], which decides how (or whether) to show
//! it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use pulse_core::NotificationIntent;

/// Consumer of notification intents, typically a toast or snackbar layer.
pub trait Presenter: Send + Sync {
    /// Show (or ignore) a single intent.
    fn present(&self, intent: &NotificationIntent);
}

impl<F> Presenter for F
where
    F: Fn(&NotificationIntent) + Send + Sync,
{
    fn present(&self, intent: &NotificationIntent) {
        self(intent)
    }
}

/// Shared list of presenters.
///
/// Clones share the same list, so presenters may be added after the client
/// has been handed off to its driver task.
#[derive(Clone, Default)]
pub struct Presenters {
    inner: Arc<Mutex<Vec<Arc<dyn Presenter>>>>,
}

impl Presenters {
    /// Create an empty presenter list.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Presenter>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a presenter.
    pub fn add(&self, presenter: Arc<dyn Presenter>) {
        self.lock().push(presenter);
    }

    /// Number of registered presenters.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no presenter is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Hand the intent to every presenter. Returns how many accepted it.
    ///
    /// A panicking presenter is logged and skipped.
    pub fn present(&self, intent: &NotificationIntent) -> usize {
        let snapshot: Vec<Arc<dyn Presenter>> = self.lock().clone();
        if snapshot.is_empty() {
            tracing::debug!(kind = ?intent.kind, "no presenter registered, intent dropped");
            return 0;
        }

        let mut presented = 0;
        for presenter in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| presenter.present(intent))) {
                Ok(()) => presented += 1,
                Err(_) => tracing::warn!(kind = ?intent.kind, "presenter panicked"),
            }
        }
        presented
    }
}

impl std::fmt::Debug for Presenters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenters")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;

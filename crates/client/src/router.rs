// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-topic subscriber lists and in-process dispatch.
//!
//! The router is a cheap clonable handle over one shared table. Dispatch
//! copies the subscriber list for the topic before invoking anything, so a
//! callback may subscribe or unsubscribe (on any topic, itself included)
//! without disturbing the delivery in progress. Changes take effect from the
//! next dispatch.
//!
//! A callback that returns an error or panics is logged and skipped; the
//! remaining subscribers still receive the message.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

/// Error a subscriber may report back to the router.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// A subscriber callback.
pub type Callback = Arc<dyn Fn(&Value) -> Result<(), CallbackError> + Send + Sync>;

/// Identifies one registration returned by [`EventRouter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// An id that refers to no registration.
    pub const DETACHED: SubscriptionId = SubscriptionId(0);
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchReport {
    /// Callbacks that returned `Ok`.
    pub delivered: usize,
    /// Callbacks that returned an error or panicked.
    pub failed: usize,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

#[derive(Default)]
struct Table {
    topics: HashMap<String, Vec<Subscriber>>,
    next_id: u64,
}

/// Routes inbound messages to local subscribers by topic.
#[derive(Clone, Default)]
pub struct EventRouter {
    table: Arc<Mutex<Table>>,
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.lock();
        let mut counts: Vec<(&String, usize)> =
            table.topics.iter().map(|(t, subs)| (t, subs.len())).collect();
        counts.sort();
        f.debug_struct("EventRouter").field("topics", &counts).finish()
    }
}

impl EventRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a closure for `topic`.
    ///
    /// Registration always succeeds. Registering the same callback twice
    /// yields two entries and two invocations per dispatch.
    pub fn subscribe<F>(&self, topic: &str, callback: F) -> SubscriptionId
    where
        F: Fn(&Value) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.subscribe_callback(topic, Arc::new(callback))
    }

    /// Register an already shared callback for `topic`.
    pub fn subscribe_callback(&self, topic: &str, callback: Callback) -> SubscriptionId {
        let mut table = self.lock();
        table.next_id += 1;
        let id = SubscriptionId(table.next_id);
        table
            .topics
            .entry(topic.to_string())
            .or_default()
            .push(Subscriber { id, callback });
        tracing::debug!(topic, subscription = id.0, "subscribed");
        id
    }

    /// Remove one registration. Returns false if it was not found.
    pub fn unsubscribe(&self, topic: &str, id: SubscriptionId) -> bool {
        self.remove_first(topic, |sub| sub.id == id)
    }

    /// Remove the first registration holding this exact callback.
    pub fn unsubscribe_callback(&self, topic: &str, callback: &Callback) -> bool {
        self.remove_first(topic, |sub| Arc::ptr_eq(&sub.callback, callback))
    }

    fn remove_first(&self, topic: &str, matches: impl Fn(&Subscriber) -> bool) -> bool {
        let mut table = self.lock();
        let Some(subs) = table.topics.get_mut(topic) else {
            return false;
        };
        let Some(pos) = subs.iter().position(matches) else {
            return false;
        };
        subs.remove(pos);
        if subs.is_empty() {
            table.topics.remove(topic);
        }
        tracing::debug!(topic, "unsubscribed");
        true
    }

    /// Remove every registration for `topic`. Returns how many were removed.
    pub fn unsubscribe_all(&self, topic: &str) -> usize {
        let removed = self
            .lock()
            .topics
            .remove(topic)
            .map_or(0, |subs| subs.len());
        if removed > 0 {
            tracing::debug!(topic, removed, "cleared subscribers");
        }
        removed
    }

    /// Number of registrations for `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock().topics.get(topic).map_or(0, Vec::len)
    }

    /// Invoke every subscriber of `topic`, in registration order.
    pub fn dispatch(&self, topic: &str, payload: &Value) -> DispatchReport {
        let snapshot: Vec<Subscriber> = self.lock().topics.get(topic).cloned().unwrap_or_default();

        let mut report = DispatchReport::default();
        for sub in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| (sub.callback)(payload))) {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(topic, subscription = sub.id.0, error = %e, "subscriber failed");
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(topic, subscription = sub.id.0, "subscriber panicked");
                }
            }
        }
        report
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;

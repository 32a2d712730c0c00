// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Cancellable delayed tasks.
//!
//! The controller never sleeps. It asks a [`Scheduler`] for a timer and later
//! receives the [`TimerId`] back through
//! [`RealtimeClient::handle_timer`](crate::RealtimeClient::handle_timer).
//! Cancelling a timer guarantees its id is never delivered.
//!
//! - [`TokioScheduler`] sleeps on the tokio runtime and posts into the
//!   driver inbox.
//! - [`ManualScheduler`] is a virtual-time queue advanced explicitly, for
//!   deterministic tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::driver::DriverEvent;

/// Identifies one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Source of delayed wake-ups for the controller.
pub trait Scheduler: Send {
    /// Arrange for `id` to be delivered after `delay`.
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler backed by tokio timers.
pub struct TokioScheduler {
    inbox: mpsc::UnboundedSender<DriverEvent>,
    timers: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler that posts fired timers into `inbox`.
    pub fn new(inbox: mpsc::UnboundedSender<DriverEvent>) -> Self {
        TokioScheduler {
            inbox,
            timers: HashMap::new(),
            next_id: 0,
        }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.timers.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let id = TimerId(self.next_id);
        let inbox = self.inbox.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = inbox.send(DriverEvent::Timer(id));
        });
        self.timers.insert(id, task);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.timers.remove(&id) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
    history: Vec<Duration>,
}

/// Virtual-time scheduler for tests.
///
/// Clones share one queue, so a test can keep a clone while the client owns
/// the other.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    /// Create an empty queue at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualQueue> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Every delay ever requested, in request order.
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        self.lock().history.clone()
    }

    /// Virtual time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.lock().now
    }

    /// Time until the earliest pending timer fires.
    pub fn next_due_in(&self) -> Option<Duration> {
        let queue = self.lock();
        queue
            .pending
            .iter()
            .map(|(due, _)| due.saturating_sub(queue.now))
            .min()
    }

    /// Move virtual time forward and return the timers that fired, earliest
    /// first.
    pub fn advance(&self, by: Duration) -> Vec<TimerId> {
        let mut queue = self.lock();
        queue.now = queue.now.saturating_add(by);
        let now = queue.now;

        let mut fired: Vec<(Duration, TimerId)> = Vec::new();
        queue.pending.retain(|&(due, id)| {
            if due <= now {
                fired.push((due, id));
                false
            } else {
                true
            }
        });
        fired.sort();
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        let mut queue = self.lock();
        queue.next_id += 1;
        let id = TimerId(queue.next_id);
        let due = queue.now.saturating_add(delay);
        queue.pending.push((due, id));
        queue.history.push(delay);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.lock().pending.retain(|&(_, pending)| pending != id);
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.pending)
            .finish()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

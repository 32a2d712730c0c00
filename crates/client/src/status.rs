// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-free view of the connection state.
//!
//! The controller is the only writer. Application code reads it from any
//! task, which is what lets [`ServiceHandle`](crate::ServiceHandle) answer
//! `is_connected()` without a round trip through the driver.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use pulse_core::ConnectionState;

/// Connection state visible to both the driver task and application code.
pub struct SharedConnectionState {
    /// Current state as its `repr(u8)` discriminant.
    state: AtomicU8,
    /// Current reconnect attempt (0 when connected).
    attempt: AtomicU32,
    /// Retry bound, for status reporting.
    max_attempts: AtomicU32,
}

impl SharedConnectionState {
    /// Create a new shared state initialized to idle.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: AtomicU8::new(ConnectionState::Idle as u8),
            attempt: AtomicU32::new(0),
            max_attempts: AtomicU32::new(max_attempts),
        }
    }

    /// Get the current state.
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Set the state.
    pub(crate) fn set(&self, state: ConnectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Get the current reconnect attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt.load(Ordering::Acquire)
    }

    /// Set the reconnect attempt.
    pub(crate) fn set_attempt(&self, attempt: u32) {
        self.attempt.store(attempt, Ordering::Release);
    }

    pub(crate) fn set_max_attempts(&self, max_attempts: u32) {
        self.max_attempts.store(max_attempts, Ordering::Release);
    }

    /// Check if currently connected.
    pub fn is_connected(&self) -> bool {
        self.get() == ConnectionState::Connected
    }

    /// Get a human-readable status string.
    pub fn status_string(&self) -> String {
        let attempt = self.attempt();
        let max = self.max_attempts.load(Ordering::Acquire);
        match self.get() {
            ConnectionState::Connecting if attempt > 0 => {
                format!("reconnecting (attempt {}/{})", attempt, max)
            }
            ConnectionState::Disconnected if attempt > 0 => {
                format!("disconnected (retry {}/{} pending)", attempt, max)
            }
            ConnectionState::GivenUp => format!("gave up after {} attempts", max),
            state => state.as_str().to_string(),
        }
    }
}

impl Default for SharedConnectionState {
    fn default() -> Self {
        Self::new(pulse_core::BackoffPolicy::DEFAULT_MAX_ATTEMPTS)
    }
}

impl std::fmt::Debug for SharedConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedConnectionState")
            .field("state", &self.get())
            .field("attempt", &self.attempt())
            .finish()
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Exponential backoff for reconnect attempts.
//!
//! `delay(attempt) = base_delay * 2^(attempt - 1)` for attempts in
//! `1..=max_attempts`. Anything outside that range has no delay, which is how
//! callers learn the retry budget is spent.

use std::time::Duration;

use crate::error::{Error, Result};

/// Bounded exponential backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    base_delay: Duration,
    max_attempts: u32,
}

impl BackoffPolicy {
    /// Delay before the first reconnect attempt.
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
    /// Reconnect attempts before giving up.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// Creates a policy with the given base delay and attempt bound.
    pub fn new(base_delay: Duration, max_attempts: u32) -> Self {
        BackoffPolicy {
            base_delay,
            max_attempts,
        }
    }

    /// Returns the delay for the first attempt.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Returns the maximum number of reconnect attempts.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay before the given (1-based) attempt.
    ///
    /// Returns `None` for attempt 0 and for attempts past the bound.
    /// Saturates at `Duration::MAX` rather than overflowing.
    pub fn delay(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        Some(self.base_delay.saturating_mul(factor))
    }

    /// Rejects a policy that would give up before the first retry.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `attempt` is past the retry bound.
    pub fn is_exhausted(&self, attempt: u32) -> bool {
        attempt > self.max_attempts
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        BackoffPolicy::new(Self::DEFAULT_BASE_DELAY, Self::DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;

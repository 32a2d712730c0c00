// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the client are defined here
//! with typed accessor functions.

/// Environment variable names.
pub mod vars {
    /// Endpoint of the realtime server.
    pub const PULSE_SOCKET_URL: &str = "PULSE_SOCKET_URL";
}

/// Endpoint used when `PULSE_SOCKET_URL` is unset.
pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:5000";

/// Returns the value of `PULSE_SOCKET_URL` if set and non-blank.
pub fn socket_url() -> Option<String> {
    std::env::var(vars::PULSE_SOCKET_URL)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the configured endpoint, falling back to [`DEFAULT_SOCKET_URL`].
pub fn socket_url_or_default() -> String {
    socket_url().unwrap_or_else(|| DEFAULT_SOCKET_URL.to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;

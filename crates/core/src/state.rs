// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection state of the realtime client.

use std::fmt;

/// State of the single upstream connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ConnectionState {
    /// Constructed, never started.
    #[default]
    Idle = 0,
    /// A transport handle is open and waiting for the opened event.
    Connecting = 1,
    /// The transport reported opened.
    Connected = 2,
    /// An explicit stop is tearing the handle down.
    Disconnecting = 3,
    /// No live handle; a retry may be pending.
    Disconnected = 4,
    /// Retry budget exhausted. Only an explicit restart leaves this state.
    GivenUp = 5,
}

impl ConnectionState {
    /// Get the state name as used in logs and status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Idle => "idle",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnecting => "disconnecting",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::GivenUp => "given_up",
        }
    }

    /// Converts the `repr(u8)` discriminant back into a state.
    ///
    /// Unknown values map to `Idle`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            3 => ConnectionState::Disconnecting,
            4 => ConnectionState::Disconnected,
            5 => ConnectionState::GivenUp,
            _ => ConnectionState::Idle,
        }
    }

    /// Returns true once the client has stopped retrying on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionState::GivenUp)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

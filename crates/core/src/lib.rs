// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pulse-core: Shared building blocks for the pulse realtime client.
//!
//! This crate holds everything that does not need a runtime or a socket:
//! the retry policy, the connection state enum, the wire envelope, the
//! outbound command schema and the translation of inbound topics into
//! notification intents.

pub mod backoff;
pub mod clock;
pub mod command;
pub mod error;
pub mod intent;
pub mod protocol;
pub mod state;

pub use backoff::BackoffPolicy;
pub use clock::{Clock, FixedClock, SystemClock};
pub use command::OutboundCommand;
pub use error::{Error, Result};
pub use intent::{IntentKind, IntentStyle, NotificationIntent};
pub use protocol::Envelope;
pub use state::ConnectionState;

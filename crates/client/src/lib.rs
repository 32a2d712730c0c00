// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! pulse - Realtime notification and reconnection client.
//!
//! Bridges a single upstream WebSocket connection to the application's
//! in-process event system and keeps that connection alive across flaky
//! networks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Realtime    ┌──────────────┐   DriverEvent   ┌──────────────┐
//! │ Application  │──────────────►│ ServiceHandle│────────────────►│    driver    │
//! └──────────────┘               └──────────────┘                 │ (tokio task) │
//!        ▲                                                        └──────┬───────┘
//!        │ callbacks / intents                                           │ owns
//! ┌──────┴───────┐   dispatch    ┌──────────────┐   Connector     ┌──────▼───────┐
//! │ EventRouter  │◄──────────────│RealtimeClient│────────────────►│  WebSocket   │
//! │ + Presenters │               │ (controller) │◄────────────────│  transport   │
//! └──────────────┘               └──────────────┘ TransportEvent  └──────────────┘
//! ```
//!
//! [`RealtimeClient`] is a plain state machine: it never awaits. Transport
//! events, timer firings and application commands reach it through one inbox
//! processed in order by [`driver::drive`]. Tests drive it directly with a
//! [`ManualScheduler`] and a mock connector, so reconnect timing is
//! deterministic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pulse::{create_service, ClientConfig, Realtime};
//!
//! let service = create_service(ClientConfig::from_env(), true);
//! service.subscribe("leaderboard-update", Arc::new(|payload: &serde_json::Value| {
//!     println!("leaderboard: {payload}");
//!     Ok(())
//! }));
//! service.join_course("course-1", "user-1");
//! ```

pub mod config;
pub mod controller;
pub mod driver;
pub mod env;
pub mod error;
pub mod facade;
pub mod notify;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod status;
pub mod transport;

pub use config::ClientConfig;
pub use controller::RealtimeClient;
pub use error::{ClientError, Result};
pub use facade::{NoopRealtime, Realtime};
pub use notify::{Presenter, Presenters};
pub use router::{Callback, CallbackError, DispatchReport, EventRouter, SubscriptionId};
pub use scheduler::{ManualScheduler, Scheduler, TimerId, TokioScheduler};
pub use service::{create_service, spawn_service, ServiceHandle, ServiceSlot};
pub use status::SharedConnectionState;
pub use transport::{
    CloseReason, Connector, HandleId, TransportError, TransportEvent, TransportHandle,
    WebSocketConnector,
};

pub use pulse_core::{
    BackoffPolicy, ConnectionState, Envelope, IntentKind, IntentStyle, NotificationIntent,
    OutboundCommand,
};

#[cfg(test)]
mod test_helpers;

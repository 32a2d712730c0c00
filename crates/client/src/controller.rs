// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connection controller: the reconnection state machine.
//!
//! ```text
//!   Idle ──start──► Connecting ──opened──► Connected
//!                      ▲  │                    │
//!          retry timer │  │ error / closed     │ error / closed
//!                      │  ▼                    ▼
//!                   Disconnected ◄─────────────┘
//!                      │
//!                      │ counter would exceed max_attempts
//!                      ▼
//!                    GivenUp
//! ```
//!
//! Every attempt opens a brand-new transport handle. Before a new handle is
//! opened the previous one is closed and forgotten, and events are matched
//! against the id of the live handle, so at most one handle can ever deliver
//! messages or trigger a reconnect.
//!
//! An explicit [`stop`](RealtimeClient::stop) is terminal: any pending retry
//! is cancelled and nothing reconnects until [`restart`](RealtimeClient::restart).

use std::sync::Arc;

use serde_json::{json, Value};

use pulse_core::intent::{self, NotificationIntent};
use pulse_core::protocol::topics;
use pulse_core::{BackoffPolicy, Clock, ConnectionState, Envelope, OutboundCommand, SystemClock};

use crate::config::ClientConfig;
use crate::notify::Presenters;
use crate::router::EventRouter;
use crate::scheduler::{Scheduler, TimerId};
use crate::status::SharedConnectionState;
use crate::transport::{Connector, HandleId, TransportEvent, TransportHandle};

/// Realtime client driving one upstream connection.
pub struct RealtimeClient<C: Connector, S: Scheduler> {
    url: String,
    policy: BackoffPolicy,
    connector: C,
    scheduler: S,
    clock: Arc<dyn Clock>,
    router: EventRouter,
    presenters: Presenters,
    shared: Arc<SharedConnectionState>,
    state: ConnectionState,
    /// Reconnect attempts since the last successful open.
    attempt: u32,
    /// The live handle, if any.
    handle: Option<(HandleId, C::Handle)>,
    next_handle_id: u64,
    pending_retry: Option<TimerId>,
    /// Set by an explicit stop; suppresses automatic reconnects.
    stopped: bool,
}

impl<C: Connector, S: Scheduler> RealtimeClient<C, S> {
    /// Create an idle client. Nothing is opened until [`start`](Self::start).
    pub fn new(config: &ClientConfig, connector: C, scheduler: S) -> Self {
        let policy = config.backoff();
        RealtimeClient {
            url: config.url.clone(),
            policy,
            connector,
            scheduler,
            clock: Arc::new(SystemClock),
            router: EventRouter::new(),
            presenters: Presenters::new(),
            shared: Arc::new(SharedConnectionState::new(policy.max_attempts())),
            state: ConnectionState::Idle,
            attempt: 0,
            handle: None,
            next_handle_id: 0,
            pending_retry: None,
            stopped: false,
        }
    }

    /// Use an existing router (shared with application code).
    pub fn with_router(mut self, router: EventRouter) -> Self {
        self.router = router;
        self
    }

    /// Use an existing presenter list.
    pub fn with_presenters(mut self, presenters: Presenters) -> Self {
        self.presenters = presenters;
        self
    }

    /// Publish state changes into an existing shared state.
    pub fn with_shared_state(mut self, shared: Arc<SharedConnectionState>) -> Self {
        shared.set_max_attempts(self.policy.max_attempts());
        shared.set(self.state);
        shared.set_attempt(self.attempt);
        self.shared = shared;
        self
    }

    /// Use a custom clock for command timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the current connection state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Check if connected.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.handle.is_some()
    }

    /// Reconnect attempts since the last successful open.
    pub fn reconnect_attempt(&self) -> u32 {
        self.attempt
    }

    /// Human-readable connection status.
    pub fn status_string(&self) -> String {
        self.shared.status_string()
    }

    /// The router inbound messages are dispatched through.
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// The presenters notification intents are handed to.
    pub fn presenters(&self) -> &Presenters {
        &self.presenters
    }

    /// The lock-free state mirror.
    pub fn shared_state(&self) -> Arc<SharedConnectionState> {
        Arc::clone(&self.shared)
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state != state {
            tracing::debug!(from = %self.state, to = %state, "connection state");
        }
        self.state = state;
        self.shared.set(state);
    }

    fn set_attempt(&mut self, attempt: u32) {
        self.attempt = attempt;
        self.shared.set_attempt(attempt);
    }

    /// Begin the first connection attempt.
    ///
    /// Only valid from `Idle`; use [`restart`](Self::restart) afterwards.
    pub fn start(&mut self) {
        if self.state != ConnectionState::Idle {
            tracing::debug!(state = %self.state, "start ignored, already started");
            return;
        }
        tracing::info!(url = %self.url, "connecting");
        self.open_handle();
    }

    /// Explicitly disconnect. Cancels any pending retry; no reconnect follows.
    ///
    /// Has no effect once the client has given up.
    pub fn stop(&mut self) {
        if self.state == ConnectionState::GivenUp {
            tracing::debug!("stop ignored, already given up");
            return;
        }

        self.stopped = true;
        self.cancel_retry();
        self.set_attempt(0);

        let was_connected = self.state == ConnectionState::Connected;
        self.set_state(ConnectionState::Disconnecting);
        self.teardown_handle();
        self.set_state(ConnectionState::Disconnected);
        tracing::info!("disconnected by request");

        if was_connected {
            self.router.dispatch(topics::CONNECTION_LOST, &Value::Null);
        }
    }

    /// Start over with a fresh retry budget.
    ///
    /// This is the way out of `GivenUp` and out of an explicit stop. Any
    /// live handle is torn down first.
    pub fn restart(&mut self) {
        tracing::info!(state = %self.state, "restarting connection");
        let was_connected = self.state == ConnectionState::Connected;
        self.stopped = false;
        self.cancel_retry();
        self.set_attempt(0);
        self.teardown_handle();
        if was_connected {
            self.router.dispatch(topics::CONNECTION_LOST, &Value::Null);
        }
        self.open_handle();
    }

    /// Apply an event reported by a transport handle.
    ///
    /// Events from any handle other than the live one are ignored.
    pub fn handle_transport_event(&mut self, id: HandleId, event: TransportEvent) {
        if self.handle.as_ref().map(|(live, _)| *live) != Some(id) {
            tracing::debug!(handle = id.0, ?event, "ignoring event from stale handle");
            return;
        }

        match event {
            TransportEvent::Opened => self.on_opened(),
            TransportEvent::Message(envelope) => self.on_message(envelope),
            TransportEvent::Closed(reason) => {
                tracing::info!(handle = id.0, ?reason, "transport closed");
                self.on_handle_down(reason.is_explicit());
            }
            TransportEvent::Error(message) => {
                tracing::warn!(handle = id.0, error = %message, "transport error");
                self.on_handle_down(false);
            }
        }
    }

    /// Apply a fired timer.
    pub fn handle_timer(&mut self, id: TimerId) {
        if self.pending_retry != Some(id) {
            tracing::debug!(timer = id.0, "ignoring stale timer");
            return;
        }
        self.pending_retry = None;

        if self.stopped || self.state != ConnectionState::Disconnected {
            return;
        }
        tracing::info!(attempt = self.attempt, max = self.policy.max_attempts(), "reconnecting");
        self.open_handle();
    }

    /// Send a command upstream, best effort.
    ///
    /// Malformed commands are dropped with a warning; commands issued while
    /// not connected are dropped silently. Returns true if the command was
    /// handed to the transport.
    pub fn send_command(&mut self, command: &OutboundCommand) -> bool {
        let envelope = match command.to_envelope(self.clock.now()) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed command");
                return false;
            }
        };

        if self.state != ConnectionState::Connected {
            tracing::debug!(topic = %envelope.topic, state = %self.state, "not connected, command dropped");
            return false;
        }
        let Some((id, handle)) = self.handle.as_mut() else {
            return false;
        };

        match handle.send(envelope) {
            Ok(()) => true,
            Err(e) => {
                // The transport reports the failure as an event of its own
                tracing::warn!(handle = id.0, topic = command.topic(), error = %e, "send failed");
                false
            }
        }
    }

    fn open_handle(&mut self) {
        self.teardown_handle();

        self.next_handle_id += 1;
        let id = HandleId(self.next_handle_id);
        self.set_state(ConnectionState::Connecting);

        match self.connector.connect(&self.url, id) {
            Ok(handle) => self.handle = Some((id, handle)),
            Err(e) => {
                tracing::warn!(handle = id.0, error = %e, "connect failed");
                self.on_handle_down(false);
            }
        }
    }

    fn teardown_handle(&mut self) {
        if let Some((id, mut handle)) = self.handle.take() {
            tracing::debug!(handle = id.0, "closing transport handle");
            handle.close();
        }
    }

    fn cancel_retry(&mut self) {
        if let Some(timer) = self.pending_retry.take() {
            self.scheduler.cancel(timer);
        }
    }

    fn on_opened(&mut self) {
        if self.state != ConnectionState::Connecting {
            return;
        }
        self.set_state(ConnectionState::Connected);
        self.set_attempt(0);
        tracing::info!(url = %self.url, "connected");
        self.router.dispatch(topics::CONNECTION_ESTABLISHED, &Value::Null);
    }

    fn on_message(&mut self, envelope: Envelope) {
        if self.state != ConnectionState::Connected {
            tracing::debug!(topic = %envelope.topic, state = %self.state, "message before open ignored");
            return;
        }

        let report = self.router.dispatch(&envelope.topic, &envelope.payload);
        tracing::debug!(
            topic = %envelope.topic,
            delivered = report.delivered,
            failed = report.failed,
            "dispatched"
        );

        if let Some(intent) = intent::translate(&envelope.topic, &envelope.payload) {
            self.presenters.present(&intent);
        }
    }

    /// The live handle closed or failed.
    fn on_handle_down(&mut self, explicit: bool) {
        let was_connected = self.state == ConnectionState::Connected;
        self.teardown_handle();
        self.set_state(ConnectionState::Disconnected);

        if was_connected {
            self.router.dispatch(topics::CONNECTION_LOST, &Value::Null);
        }

        if explicit {
            self.stopped = true;
        }
        if self.stopped {
            return;
        }
        self.schedule_reconnect();
    }

    fn schedule_reconnect(&mut self) {
        let next = self.attempt.saturating_add(1);
        let Some(delay) = self.policy.delay(next) else {
            self.give_up();
            return;
        };

        self.set_attempt(next);
        tracing::warn!(
            attempt = next,
            max = self.policy.max_attempts(),
            delay_ms = delay.as_millis() as u64,
            "connection lost, retry scheduled"
        );
        self.pending_retry = Some(self.scheduler.schedule(delay));
    }

    fn give_up(&mut self) {
        self.cancel_retry();
        self.set_state(ConnectionState::GivenUp);
        tracing::error!(attempts = self.attempt, "reconnect attempts exhausted, giving up");

        self.router.dispatch(
            topics::CONNECTION_EXHAUSTED,
            &json!({ "attempts": self.attempt }),
        );
        self.presenters
            .present(&NotificationIntent::connection_exhausted(self.attempt));
    }
}

impl<C: Connector, S: Scheduler> std::fmt::Debug for RealtimeClient<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("url", &self.url)
            .field("state", &self.state)
            .field("attempt", &self.attempt)
            .field("stopped", &self.stopped)
            .finish()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

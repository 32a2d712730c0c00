// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Service lifecycle.
//!
//! [`spawn_service`] builds a [`RealtimeClient`] over the WebSocket transport
//! and moves it into a driver task. The returned [`ServiceHandle`] is what
//! application code holds; it shares the router, presenter list and state
//! mirror with the client and forwards everything else through the driver
//! inbox.
//!
//! [`create_service`] is the entry point most callers want. It returns a live
//! service when running interactively inside a tokio runtime and a
//! [`NoopRealtime`] otherwise, so callers never branch on the environment.

use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc;

use pulse_core::{ConnectionState, OutboundCommand};

use crate::config::ClientConfig;
use crate::controller::RealtimeClient;
use crate::driver::{self, DriverEvent};
use crate::error::{ClientError, Result};
use crate::facade::{NoopRealtime, Realtime};
use crate::notify::{Presenter, Presenters};
use crate::router::{Callback, EventRouter, SubscriptionId};
use crate::scheduler::TokioScheduler;
use crate::status::SharedConnectionState;
use crate::transport::WebSocketConnector;

/// Handle to a running realtime service.
///
/// Cheap to clone. The driver shuts down when the last clone is dropped or
/// when [`shutdown`](Self::shutdown) is called.
#[derive(Clone)]
pub struct ServiceHandle {
    inbox: mpsc::UnboundedSender<DriverEvent>,
    router: EventRouter,
    presenters: Presenters,
    shared: Arc<SharedConnectionState>,
    _guard: Arc<ShutdownOnDrop>,
}

/// Posts `Shutdown` to the driver when the last handle goes away.
///
/// The connector and scheduler hold inbox senders of their own, so the
/// channel never closes by itself.
struct ShutdownOnDrop {
    inbox: mpsc::UnboundedSender<DriverEvent>,
}

impl Drop for ShutdownOnDrop {
    fn drop(&mut self) {
        if self.inbox.send(DriverEvent::Shutdown).is_ok() {
            tracing::debug!("last realtime handle dropped, shutting down");
        }
    }
}

impl ServiceHandle {
    /// Human-readable connection status.
    pub fn status_string(&self) -> String {
        self.shared.status_string()
    }

    /// Reconnect attempts since the last successful open.
    pub fn reconnect_attempt(&self) -> u32 {
        self.shared.attempt()
    }

    /// The router callbacks are registered on.
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// Stop the connection and end the driver task.
    pub fn shutdown(&self) {
        self.post(DriverEvent::Shutdown);
    }

    fn post(&self, event: DriverEvent) {
        if self.inbox.send(event).is_err() {
            tracing::debug!("realtime driver has exited");
        }
    }
}

impl Realtime for ServiceHandle {
    fn state(&self) -> ConnectionState {
        self.shared.get()
    }

    fn subscribe(&self, topic: &str, callback: Callback) -> SubscriptionId {
        self.router.subscribe_callback(topic, callback)
    }

    fn unsubscribe(&self, topic: &str, id: SubscriptionId) -> bool {
        self.router.unsubscribe(topic, id)
    }

    fn unsubscribe_callback(&self, topic: &str, callback: &Callback) -> bool {
        self.router.unsubscribe_callback(topic, callback)
    }

    fn unsubscribe_all(&self, topic: &str) -> usize {
        self.router.unsubscribe_all(topic)
    }

    fn add_presenter(&self, presenter: Arc<dyn Presenter>) {
        self.presenters.add(presenter);
    }

    fn submit(&self, command: OutboundCommand) {
        if let Err(e) = command.validate() {
            tracing::warn!(error = %e, "dropping malformed command");
            return;
        }
        if !self.shared.is_connected() {
            tracing::debug!(topic = command.topic(), "not connected, command dropped");
            return;
        }
        self.post(DriverEvent::Command(command));
    }

    fn stop(&self) {
        self.post(DriverEvent::Stop);
    }

    fn restart(&self) {
        self.post(DriverEvent::Restart);
    }
}

impl std::fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("state", &self.shared.get())
            .field("attempt", &self.shared.attempt())
            .finish()
    }
}

/// Start a live realtime service on the current tokio runtime.
///
/// The first connection attempt begins immediately.
pub fn spawn_service(config: ClientConfig) -> Result<ServiceHandle> {
    let config = config.normalized();
    config.validate()?;
    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|_| ClientError::Config("realtime service needs a tokio runtime".to_string()))?;

    let (inbox, events) = mpsc::unbounded_channel();
    let router = EventRouter::new();
    let presenters = Presenters::new();
    let shared = Arc::new(SharedConnectionState::new(config.max_attempts));

    let client = RealtimeClient::new(
        &config,
        WebSocketConnector::new(inbox.clone()),
        TokioScheduler::new(inbox.clone()),
    )
    .with_router(router.clone())
    .with_presenters(presenters.clone())
    .with_shared_state(Arc::clone(&shared));

    tracing::info!(url = %config.url, "starting realtime service");
    runtime.spawn(driver::drive(client, events));

    Ok(ServiceHandle {
        _guard: Arc::new(ShutdownOnDrop {
            inbox: inbox.clone(),
        }),
        inbox,
        router,
        presenters,
        shared,
    })
}

/// Create the realtime service for this process.
///
/// Returns a live service when `interactive` is true and a tokio runtime is
/// available, and a [`NoopRealtime`] otherwise. A config that fails
/// [`ClientConfig::validate`] also yields the no-op, after a warning.
/// `http://` and `https://` endpoints are rewritten to their WebSocket
/// schemes first. Never fails.
pub fn create_service(config: ClientConfig, interactive: bool) -> Arc<dyn Realtime> {
    if !interactive {
        tracing::debug!("non-interactive environment, realtime disabled");
        return Arc::new(NoopRealtime);
    }

    match spawn_service(config) {
        Ok(handle) => Arc::new(handle),
        Err(e) => {
            tracing::warn!(error = %e, "realtime service unavailable, using no-op");
            Arc::new(NoopRealtime)
        }
    }
}

/// Process-wide home for the realtime service.
///
/// ```rust,ignore
/// static REALTIME: ServiceSlot = ServiceSlot::new();
///
/// let service = REALTIME.get_or_create(ClientConfig::from_env(), true);
/// ```
pub struct ServiceSlot {
    cell: OnceLock<Arc<dyn Realtime>>,
}

impl ServiceSlot {
    pub const fn new() -> Self {
        ServiceSlot {
            cell: OnceLock::new(),
        }
    }

    /// The service, if one has been created.
    pub fn get(&self) -> Option<Arc<dyn Realtime>> {
        self.cell.get().cloned()
    }

    /// The service, creating it with `init` on first use.
    pub fn get_or_init(&self, init: impl FnOnce() -> Arc<dyn Realtime>) -> Arc<dyn Realtime> {
        Arc::clone(self.cell.get_or_init(init))
    }

    /// The service, creating it with [`create_service`] on first use.
    ///
    /// Later calls return the first service regardless of their arguments.
    pub fn get_or_create(&self, config: ClientConfig, interactive: bool) -> Arc<dyn Realtime> {
        self.get_or_init(|| create_service(config, interactive))
    }
}

impl Default for ServiceSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers: a mock connector and a recording presenter.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use pulse_core::{Envelope, FixedClock, NotificationIntent};

use crate::config::ClientConfig;
use crate::controller::RealtimeClient;
use crate::notify::Presenter;
use crate::scheduler::ManualScheduler;
use crate::transport::{Connector, HandleId, TransportError, TransportHandle, TransportResult};

#[derive(Default)]
struct MockLog {
    connects: Vec<(String, HandleId)>,
    sent: Vec<(HandleId, Envelope)>,
    closed: Vec<HandleId>,
    fail_connect: bool,
    fail_send: bool,
}

/// Mock connector recording every call. Clones share one log.
#[derive(Clone, Default)]
pub struct MockConnector {
    log: Arc<Mutex<MockLog>>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `connect` calls fail synchronously.
    pub fn set_connect_fail(&self, fail: bool) {
        self.log.lock().unwrap().fail_connect = fail;
    }

    /// Make subsequent `send` calls fail.
    pub fn set_send_fail(&self, fail: bool) {
        self.log.lock().unwrap().fail_send = fail;
    }

    /// Number of connect calls so far, failed ones included.
    pub fn connect_count(&self) -> usize {
        self.log.lock().unwrap().connects.len()
    }

    /// Id passed to the most recent connect call.
    pub fn last_handle(&self) -> HandleId {
        self.log.lock().unwrap().connects.last().unwrap().1
    }

    /// Url passed to the most recent connect call.
    pub fn last_url(&self) -> String {
        self.log.lock().unwrap().connects.last().unwrap().0.clone()
    }

    /// Everything sent, across all handles.
    pub fn sent(&self) -> Vec<Envelope> {
        let log = self.log.lock().unwrap();
        log.sent.iter().map(|(_, e)| e.clone()).collect()
    }

    /// Handles that were closed, in order.
    pub fn closed(&self) -> Vec<HandleId> {
        self.log.lock().unwrap().closed.clone()
    }
}

impl Connector for MockConnector {
    type Handle = MockHandle;

    fn connect(&mut self, url: &str, id: HandleId) -> TransportResult<MockHandle> {
        let mut log = self.log.lock().unwrap();
        log.connects.push((url.to_string(), id));
        if log.fail_connect {
            return Err(TransportError::ConnectionFailed("mock failure".into()));
        }
        Ok(MockHandle {
            id,
            log: Arc::clone(&self.log),
        })
    }
}

pub struct MockHandle {
    id: HandleId,
    log: Arc<Mutex<MockLog>>,
}

impl TransportHandle for MockHandle {
    fn send(&mut self, envelope: Envelope) -> TransportResult<()> {
        let mut log = self.log.lock().unwrap();
        if log.fail_send {
            return Err(TransportError::SendFailed("mock failure".into()));
        }
        log.sent.push((self.id, envelope));
        Ok(())
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closed.push(self.id);
    }
}

/// Presenter that keeps every intent it is shown.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    seen: Arc<Mutex<Vec<NotificationIntent>>>,
}

impl RecordingPresenter {
    pub fn intents(&self) -> Vec<NotificationIntent> {
        self.seen.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&self, intent: &NotificationIntent) {
        self.seen.lock().unwrap().push(intent.clone());
    }
}

/// A fixed instant for timestamped commands.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

/// Config with a one second base delay and the given attempt bound.
pub fn test_config(max_attempts: u32) -> ClientConfig {
    ClientConfig {
        url: "ws://test.invalid:5000".to_string(),
        max_attempts,
        base_delay_ms: 1000,
    }
}

pub type TestClient = RealtimeClient<MockConnector, ManualScheduler>;

/// Build a client over a mock connector and manual scheduler, returning
/// clones of both for inspection.
pub fn make_client(max_attempts: u32) -> (TestClient, MockConnector, ManualScheduler) {
    let connector = MockConnector::new();
    let scheduler = ManualScheduler::new();
    let client = RealtimeClient::new(
        &test_config(max_attempts),
        connector.clone(),
        scheduler.clone(),
    )
    .with_clock(Arc::new(FixedClock(test_now())));
    (client, connector, scheduler)
}

/// Advance virtual time and feed every fired timer to the client.
pub fn advance(client: &mut TestClient, scheduler: &ManualScheduler, by: Duration) {
    for timer in scheduler.advance(by) {
        client.handle_timer(timer);
    }
}

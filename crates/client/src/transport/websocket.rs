// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket transport using tokio-tungstenite.
//!
//! Each handle owns one background task that connects, forwards outbound
//! envelopes and reports inbound frames. Closing the handle cancels the task
//! before it can report anything else, so a torn-down handle goes quiet.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use pulse_core::Envelope;

use super::{
    CloseReason, Connector, HandleId, TransportError, TransportEvent, TransportHandle,
    TransportResult,
};
use crate::driver::DriverEvent;

/// Opens WebSocket connections and reports their events into the driver
/// inbox.
pub struct WebSocketConnector {
    inbox: mpsc::UnboundedSender<DriverEvent>,
}

impl WebSocketConnector {
    /// Create a connector that posts transport events into `inbox`.
    pub fn new(inbox: mpsc::UnboundedSender<DriverEvent>) -> Self {
        WebSocketConnector { inbox }
    }
}

impl Connector for WebSocketConnector {
    type Handle = WebSocketHandle;

    fn connect(&mut self, url: &str, id: HandleId) -> TransportResult<WebSocketHandle> {
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(TransportError::ConnectionFailed(
                "no tokio runtime available".to_string(),
            ));
        }

        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_connection(
            url.to_string(),
            id,
            outgoing_rx,
            self.inbox.clone(),
            cancel.clone(),
        ));

        tracing::debug!(handle = id.0, url, "opening websocket");
        Ok(WebSocketHandle {
            outgoing,
            cancel,
            _task: task,
        })
    }
}

/// A single WebSocket connection attempt.
pub struct WebSocketHandle {
    outgoing: mpsc::UnboundedSender<Envelope>,
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl TransportHandle for WebSocketHandle {
    fn send(&mut self, envelope: Envelope) -> TransportResult<()> {
        self.outgoing
            .send(envelope)
            .map_err(|_| TransportError::ConnectionClosed)
    }

    fn close(&mut self) {
        self.cancel.cancel();
    }
}

impl Drop for WebSocketHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn post(inbox: &mpsc::UnboundedSender<DriverEvent>, id: HandleId, event: TransportEvent) {
    // The driver going away means nobody is listening any more.
    let _ = inbox.send(DriverEvent::Transport(id, event));
}

/// Background task for one handle.
async fn run_connection(
    url: String,
    id: HandleId,
    mut outgoing: mpsc::UnboundedReceiver<Envelope>,
    inbox: mpsc::UnboundedSender<DriverEvent>,
    cancel: CancellationToken,
) {
    let connected = tokio::select! {
        _ = cancel.cancelled() => return,
        result = tokio_tungstenite::connect_async(url.as_str()) => result,
    };

    let ws_stream = match connected {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            post(&inbox, id, TransportEvent::Error(e.to_string()));
            return;
        }
    };

    post(&inbox, id, TransportEvent::Opened);
    let (mut sink, mut stream) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = sink.close().await;
                return;
            }
            outbound = outgoing.recv() => {
                let Some(envelope) = outbound else {
                    let _ = sink.close().await;
                    return;
                };
                let json = match envelope.to_json() {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::warn!(handle = id.0, topic = %envelope.topic, error = %e, "dropping unserializable frame");
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::Text(json.into())).await {
                    let err = TransportError::SendFailed(e.to_string());
                    post(&inbox, id, TransportEvent::Error(err.to_string()));
                    return;
                }
            }
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => match Envelope::from_json(&text) {
                    Ok(envelope) => post(&inbox, id, TransportEvent::Message(envelope)),
                    Err(e) => {
                        tracing::warn!(handle = id.0, error = %e, "ignoring malformed frame");
                    }
                },
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.as_str().to_string())
                        .unwrap_or_default();
                    post(&inbox, id, TransportEvent::Closed(CloseReason::Remote(reason)));
                    return;
                }
                Some(Ok(_)) => {
                    // Ping/pong and binary frames carry nothing for us
                }
                Some(Err(e)) => {
                    post(&inbox, id, TransportEvent::Error(e.to_string()));
                    return;
                }
                None => {
                    post(&inbox, id, TransportEvent::Closed(CloseReason::StreamEnded));
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "websocket_tests.rs"]
mod tests;

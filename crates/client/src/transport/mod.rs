// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction.
//!
//! A [`Connector`] opens one [`TransportHandle`] per connection attempt. The
//! handle only sends and closes; everything the transport has to say comes
//! back as a [`TransportEvent`] tagged with the [`HandleId`] it was opened
//! with. The controller uses that id to ignore events from handles it has
//! already torn down.

mod websocket;

pub use websocket::{WebSocketConnector, WebSocketHandle};

use pulse_core::Envelope;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Identifies one transport handle for the lifetime of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

/// Why a transport closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// This side asked for the close.
    ClientInitiated,
    /// The server sent a close frame.
    Remote(String),
    /// The stream ended without a close frame.
    StreamEnded,
}

impl CloseReason {
    /// Returns true if the close was requested locally.
    pub fn is_explicit(&self) -> bool {
        matches!(self, CloseReason::ClientInitiated)
    }
}

/// Something the transport reports about a handle.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The connection is open.
    Opened,
    /// An inbound message.
    Message(Envelope),
    /// The connection closed.
    Closed(CloseReason),
    /// The connection failed.
    Error(String),
}

/// Factory for transport handles.
pub trait Connector: Send {
    type Handle: TransportHandle;

    /// Begin opening a connection to `url`.
    ///
    /// Returning `Ok` means the attempt is under way; the outcome arrives
    /// later as `Opened`, `Closed` or `Error` for `id`. Returning `Err`
    /// means the attempt could not even start.
    fn connect(&mut self, url: &str, id: HandleId) -> TransportResult<Self::Handle>;
}

/// One live connection attempt.
pub trait TransportHandle: Send {
    /// Queue an outbound frame.
    fn send(&mut self, envelope: Envelope) -> TransportResult<()>;

    /// Tear the connection down. No events for this handle are delivered
    /// afterwards.
    fn close(&mut self);
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The single task that owns a [`RealtimeClient`].
//!
//! Transport events, timer firings and application requests all arrive
//! through one unbounded inbox and are applied to the client strictly in
//! arrival order. This is the only place the client is touched, so the state
//! machine needs no locking.

use tokio::sync::mpsc;

use pulse_core::OutboundCommand;

use crate::controller::RealtimeClient;
use crate::scheduler::{Scheduler, TimerId};
use crate::transport::{Connector, HandleId, TransportEvent};

/// Everything the driver reacts to.
#[derive(Debug)]
pub enum DriverEvent {
    /// Reported by a transport handle.
    Transport(HandleId, TransportEvent),
    /// A scheduled timer fired.
    Timer(TimerId),
    /// Application asked to send a command.
    Command(OutboundCommand),
    /// Application asked for an explicit stop.
    Stop,
    /// Application asked to reconnect from scratch.
    Restart,
    /// Stop and exit the driver.
    Shutdown,
}

/// Start the client and apply inbox events until [`DriverEvent::Shutdown`].
pub async fn drive<C, S>(
    mut client: RealtimeClient<C, S>,
    mut inbox: mpsc::UnboundedReceiver<DriverEvent>,
) where
    C: Connector,
    S: Scheduler,
{
    client.start();

    while let Some(event) = inbox.recv().await {
        match event {
            DriverEvent::Transport(id, event) => client.handle_transport_event(id, event),
            DriverEvent::Timer(id) => client.handle_timer(id),
            DriverEvent::Command(command) => {
                client.send_command(&command);
            }
            DriverEvent::Stop => client.stop(),
            DriverEvent::Restart => client.restart(),
            DriverEvent::Shutdown => {
                client.stop();
                break;
            }
        }
    }

    tracing::debug!("realtime driver exited");
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;

//! The single hub dispatcher task.
//!
//! [`Hub`] owns the [`ConnectionSet`] outright and drains [`HubEvent`]s one
//! at a time. Each event runs to completion before the next is read, and
//! fan-out never waits on a recipient, so the loop never suspends while
//! holding the set.

use tokio::sync::mpsc;

use super::HubEvent;
use crate::domain::{ConnectionEntry, ConnectionSet};

/// Broadcast hub state machine.
#[derive(Debug, Default)]
pub struct Hub {
    connections: ConnectionSet,
}

impl Hub {
    /// Creates a hub with no connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current membership.
    #[must_use]
    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    /// Applies one event.
    pub fn handle(&mut self, event: HubEvent) {
        match event {
            HubEvent::Connect { id, name, outbound } => {
                tracing::info!(connection_id = %id, user = %name, "user connected");
                self.connections.add(id, ConnectionEntry::new(name, outbound));
            }
            HubEvent::Message { id, message } => {
                if !self.connections.contains(id) {
                    tracing::debug!(
                        connection_id = %id,
                        "message from unregistered connection dropped"
                    );
                    return;
                }
                let report = self.connections.broadcast(&message);
                tracing::debug!(
                    connection_id = %id,
                    delivered = report.delivered,
                    skipped = report.skipped,
                    pruned = report.pruned,
                    "message broadcast"
                );
            }
            HubEvent::Disconnect { id } => {
                if let Some(entry) = self.connections.remove(id) {
                    tracing::info!(connection_id = %id, user = %entry.name, "user disconnected");
                }
            }
            HubEvent::Count { reply } => {
                // Requester may have given up waiting.
                let _ = reply.send(self.connections.len());
            }
        }
    }

    /// Drains `events` until every sender is gone.
    pub async fn run(mut self, mut events: mpsc::Receiver<HubEvent>) {
        tracing::debug!("hub dispatcher started");
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::debug!(remaining = self.connections.len(), "hub dispatcher stopped");
    }
}

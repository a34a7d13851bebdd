//! Cloneable entry point into the hub dispatcher.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::{Hub, HubEvent};
use crate::domain::{ChatMessage, ConnectionId};
use crate::error::ChatError;

/// Sending side of the hub's event queue.
///
/// Every WebSocket connection holds a clone. Dropping the last clone lets
/// the dispatcher task finish.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::Sender<HubEvent>,
    outbound_capacity: usize,
}

impl HubHandle {
    /// Spawns a [`Hub`] dispatcher and returns a handle to it.
    ///
    /// `queue_capacity` bounds the inbound event queue, `outbound_capacity`
    /// bounds each connection's broadcast queue.
    pub fn spawn(queue_capacity: usize, outbound_capacity: usize) -> (Self, JoinHandle<()>) {
        let (events, rx) = mpsc::channel(queue_capacity.max(1));
        let task = tokio::spawn(Hub::new().run(rx));
        let handle = Self {
            events,
            outbound_capacity: outbound_capacity.max(1),
        };
        (handle, task)
    }

    /// Registers a new connection and returns its id and broadcast queue.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::HubClosed`] if the dispatcher has stopped.
    pub async fn connect(
        &self,
        name: impl Into<String>,
    ) -> Result<(ConnectionId, mpsc::Receiver<ChatMessage>), ChatError> {
        let id = ConnectionId::new();
        let (outbound, rx) = mpsc::channel(self.outbound_capacity);
        self.send(HubEvent::Connect {
            id,
            name: name.into(),
            outbound,
        })
        .await?;
        Ok((id, rx))
    }

    /// Hands a message from `id` to the hub for fan-out.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::HubClosed`] if the dispatcher has stopped.
    pub async fn publish(&self, id: ConnectionId, message: ChatMessage) -> Result<(), ChatError> {
        self.send(HubEvent::Message { id, message }).await
    }

    /// Removes `id` from the connection set.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::HubClosed`] if the dispatcher has stopped.
    pub async fn disconnect(&self, id: ConnectionId) -> Result<(), ChatError> {
        self.send(HubEvent::Disconnect { id }).await
    }

    /// Asks the dispatcher how many connections are registered.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::HubClosed`] if the dispatcher has stopped.
    pub async fn connection_count(&self) -> Result<usize, ChatError> {
        let (reply, answer) = oneshot::channel();
        self.send(HubEvent::Count { reply }).await?;
        answer.await.map_err(|_| ChatError::HubClosed)
    }

    async fn send(&self, event: HubEvent) -> Result<(), ChatError> {
        self.events
            .send(event)
            .await
            .map_err(|_| ChatError::HubClosed)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn broadcast_round_trip_through_dispatcher() {
        let (hub, _task) = HubHandle::spawn(16, 16);
        let Ok((alice, mut rx_alice)) = hub.connect("alice").await else {
            panic!("connect alice");
        };
        let Ok((_bob, mut rx_bob)) = hub.connect("bob").await else {
            panic!("connect bob");
        };

        let msg = ChatMessage::new("alice", "hello");
        tokio_test::assert_ok!(hub.publish(alice, msg.clone()).await);

        assert_eq!(rx_alice.recv().await, Some(msg.clone()));
        assert_eq!(rx_bob.recv().await, Some(msg));
    }

    #[tokio::test]
    async fn count_follows_connect_and_disconnect() {
        let (hub, _task) = HubHandle::spawn(16, 16);
        assert_eq!(hub.connection_count().await.ok(), Some(0));

        let Ok((id, _rx)) = hub.connect("").await else {
            panic!("connect");
        };
        assert_eq!(hub.connection_count().await.ok(), Some(1));

        tokio_test::assert_ok!(hub.disconnect(id).await);
        assert_eq!(hub.connection_count().await.ok(), Some(0));
    }

    #[tokio::test]
    async fn dispatcher_stops_when_handles_dropped() {
        let (hub, task) = HubHandle::spawn(4, 4);
        drop(hub);
        let finished = tokio::time::timeout(Duration::from_secs(1), task).await;
        assert!(matches!(finished, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn closed_hub_reports_error() {
        let (events, rx) = mpsc::channel(1);
        drop(rx);
        let hub = HubHandle {
            events,
            outbound_capacity: 1,
        };
        assert!(matches!(hub.connect("x").await, Err(ChatError::HubClosed)));
    }
}

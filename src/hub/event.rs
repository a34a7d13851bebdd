//! Events consumed by the hub dispatcher.

use tokio::sync::{mpsc, oneshot};

use crate::domain::{ChatMessage, ConnectionId};

/// Everything that can happen to the hub, in the order it happened.
///
/// Connection tasks never touch the [`crate::domain::ConnectionSet`]
/// directly; they enqueue one of these and the dispatcher applies it.
#[derive(Debug)]
pub enum HubEvent {
    /// A client finished its handshake.
    Connect {
        /// Identifier assigned to the new connection.
        id: ConnectionId,
        /// Display name from the handshake, empty when absent.
        name: String,
        /// Queue the hub pushes broadcasts into.
        outbound: mpsc::Sender<ChatMessage>,
    },
    /// A client sent a chat message.
    Message {
        /// Originating connection.
        id: ConnectionId,
        /// Payload to rebroadcast unchanged.
        message: ChatMessage,
    },
    /// A client's channel closed.
    Disconnect {
        /// Connection to remove.
        id: ConnectionId,
    },
    /// Request for the current number of connections.
    Count {
        /// Where to send the answer.
        reply: oneshot::Sender<usize>,
    },
}

//! Membership registry of live chat connections.
//!
//! [`ConnectionSet`] is owned by the hub dispatcher and only mutated from
//! there, so it needs no interior locking. Each entry holds the sending
//! half of the connection's bounded outbound queue.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::{ChatMessage, ConnectionId};

/// One registered connection.
#[derive(Debug)]
pub struct ConnectionEntry {
    /// Display name given at handshake time. May be empty.
    pub name: String,
    outbound: mpsc::Sender<ChatMessage>,
}

impl ConnectionEntry {
    /// Creates an entry from a display name and outbound queue.
    #[must_use]
    pub fn new(name: String, outbound: mpsc::Sender<ChatMessage>) -> Self {
        Self { name, outbound }
    }
}

/// Outcome of a single fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients whose queue accepted the message.
    pub delivered: usize,
    /// Recipients whose queue was full; the message was skipped for them.
    pub skipped: usize,
    /// Recipients whose queue was already closed and were pruned.
    pub pruned: usize,
}

/// The hub's set of active connections.
#[derive(Debug, Default)]
pub struct ConnectionSet {
    entries: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection. Replaces any entry with the same id.
    pub fn add(&mut self, id: ConnectionId, entry: ConnectionEntry) {
        self.entries.insert(id, entry);
    }

    /// Removes a connection, returning its entry if it was registered.
    pub fn remove(&mut self, id: ConnectionId) -> Option<ConnectionEntry> {
        self.entries.remove(&id)
    }

    /// Returns `true` if the id is registered.
    #[must_use]
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns the display name of a registered connection.
    #[must_use]
    pub fn name_of(&self, id: ConnectionId) -> Option<&str> {
        self.entries.get(&id).map(|e| e.name.as_str())
    }

    /// Number of registered connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no connection is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offers `message` to every registered connection, sender included.
    ///
    /// Never waits: a full queue skips that recipient, a closed queue
    /// removes the recipient from the set.
    pub fn broadcast(&mut self, message: &ChatMessage) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut closed = Vec::new();

        for (id, entry) in &self.entries {
            match entry.outbound.try_send(message.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(
                        connection_id = %id,
                        user = %entry.name,
                        "outbound queue full, message skipped"
                    );
                    report.skipped += 1;
                }
                Err(TrySendError::Closed(_)) => closed.push(*id),
            }
        }

        for id in closed {
            if let Some(entry) = self.entries.remove(&id) {
                tracing::debug!(
                    connection_id = %id,
                    user = %entry.name,
                    "pruned closed connection"
                );
                report.pruned += 1;
            }
        }

        report
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn register(
        set: &mut ConnectionSet,
        name: &str,
        capacity: usize,
    ) -> (ConnectionId, mpsc::Receiver<ChatMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        let id = ConnectionId::new();
        set.add(id, ConnectionEntry::new(name.to_string(), tx));
        (id, rx)
    }

    #[test]
    fn add_and_remove_track_membership() {
        let mut set = ConnectionSet::new();
        assert!(set.is_empty());

        let (id, _rx) = register(&mut set, "alice", 4);
        assert!(set.contains(id));
        assert_eq!(set.name_of(id), Some("alice"));
        assert_eq!(set.len(), 1);

        let Some(entry) = set.remove(id) else {
            panic!("entry should be present");
        };
        assert_eq!(entry.name, "alice");
        assert!(!set.contains(id));
        assert!(set.remove(id).is_none());
    }

    #[test]
    fn broadcast_reaches_every_member() {
        let mut set = ConnectionSet::new();
        let (_a, mut rx_a) = register(&mut set, "alice", 4);
        let (_b, mut rx_b) = register(&mut set, "bob", 4);

        let msg = ChatMessage::new("alice", "hello");
        let report = set.broadcast(&msg);
        assert_eq!(report.delivered, 2);

        assert_eq!(rx_a.try_recv().ok(), Some(msg.clone()));
        assert_eq!(rx_b.try_recv().ok(), Some(msg));
    }

    #[test]
    fn full_queue_skips_only_that_recipient() {
        let mut set = ConnectionSet::new();
        let (_slow, _rx_slow) = register(&mut set, "slow", 1);
        let (_fast, mut rx_fast) = register(&mut set, "fast", 8);

        set.broadcast(&ChatMessage::new("x", "1"));
        let report = set.broadcast(&ChatMessage::new("x", "2"));

        assert_eq!(report.delivered, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(set.len(), 2);
        assert_eq!(rx_fast.try_recv().ok().map(|m| m.message), Some("1".to_string()));
        assert_eq!(rx_fast.try_recv().ok().map(|m| m.message), Some("2".to_string()));
    }

    #[test]
    fn closed_queue_is_pruned_without_error() {
        let mut set = ConnectionSet::new();
        let (gone, rx_gone) = register(&mut set, "gone", 4);
        let (_stay, mut rx_stay) = register(&mut set, "stay", 4);
        drop(rx_gone);

        let report = set.broadcast(&ChatMessage::new("stay", "ping"));
        assert_eq!(report.delivered, 1);
        assert_eq!(report.pruned, 1);
        assert!(!set.contains(gone));
        assert!(rx_stay.try_recv().is_ok());
    }
}

//! The chat message carried through the hub.

use serde::{Deserialize, Serialize};

/// A single chat line: sender display name and body.
///
/// Neither field is validated. The hub never stores messages; they exist
/// only while in transit from one client to all clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name the sender connected with.
    pub user: String,
    /// Message body.
    pub message: String,
}

impl ChatMessage {
    /// Creates a message from a sender name and body.
    #[must_use]
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            message: message.into(),
        }
    }
}

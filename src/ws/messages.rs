//! WebSocket wire format.
//!
//! Every text frame, in both directions, is a named event with a payload:
//!
//! ```json
//! { "event": "message", "data": { "user": "alice", "message": "hi" } }
//! ```
//!
//! `message` is the only event. Frames that do not decode to it are
//! ignored by both the hub and the client.

use serde::{Deserialize, Serialize};

use crate::domain::ChatMessage;

/// A decoded text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WsFrame {
    /// A chat line, client to hub or hub to every client.
    Message(ChatMessage),
}

impl WsFrame {
    /// Encodes the frame as JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if encoding fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown events,
    /// or a payload missing `user` or `message`.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<ChatMessage> for WsFrame {
    fn from(message: ChatMessage) -> Self {
        Self::Message(message)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn encodes_event_envelope() {
        let frame = WsFrame::from(ChatMessage::new("alice", "hi"));
        let Ok(text) = frame.encode() else {
            panic!("encode");
        };
        let value: serde_json::Value = serde_json::from_str(&text).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({ "event": "message", "data": { "user": "alice", "message": "hi" } })
        );
    }

    #[test]
    fn decodes_message_event() {
        let decoded = WsFrame::decode(r#"{"event":"message","data":{"user":"","message":"x"}}"#);
        assert_eq!(decoded.ok(), Some(WsFrame::Message(ChatMessage::new("", "x"))));
    }

    #[test]
    fn rejects_unknown_event_and_bad_payloads() {
        assert!(WsFrame::decode(r#"{"event":"typing","data":{}}"#).is_err());
        assert!(WsFrame::decode(r#"{"event":"message","data":{"user":"a"}}"#).is_err());
        assert!(WsFrame::decode("not json").is_err());
    }
}

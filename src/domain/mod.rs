//! Domain layer: connection identity, chat messages, and the connection set.
//!
//! These types carry no I/O of their own. The hub owns the
//! [`ConnectionSet`] and the WebSocket layer moves [`ChatMessage`]s in and
//! out of it.

pub mod chat_message;
pub mod connection_id;
pub mod connection_set;

pub use chat_message::ChatMessage;
pub use connection_id::ConnectionId;
pub use connection_set::{BroadcastReport, ConnectionEntry, ConnectionSet};

//! Crate error type.
//!
//! [`ChatError`] covers the few places where something can actually fail:
//! configuration, the client's transport, and a hub that has shut down.
//! Chat traffic itself fails silently and never produces one of these.

/// Central error enum for the hub and the client.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// A configuration value was present but unusable.
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Environment variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The client endpoint could not be parsed as a URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// WebSocket transport failure on the client side.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The hub dispatcher has stopped and no longer accepts events.
    #[error("hub is no longer running")]
    HubClosed,
}

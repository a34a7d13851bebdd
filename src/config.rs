//! Hub and client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Every key has a default, so an empty
//! environment yields the classic demo setup: hub on port 8080, browser
//! origin `http://localhost:3000`, client talking to `127.0.0.1:8080`.

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::client::EchoPolicy;
use crate::error::ChatError;

/// Default hub bind address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
/// Default origin allowed by CORS.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
/// Default endpoint the client connects to.
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Hub (server) configuration.
///
/// Loaded once at startup via [`HubConfig::from_env`].
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// The single cross-origin allowed to reach the server.
    pub allowed_origin: HeaderValue,

    /// Capacity of the hub's inbound event queue.
    pub hub_queue_capacity: usize,

    /// Capacity of each connection's outbound queue. When full, new
    /// broadcasts to that connection are skipped.
    pub outbound_queue_capacity: usize,
}

impl HubConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidConfig`] if `LISTEN_ADDR` or
    /// `ALLOWED_ORIGIN` is set but unusable.
    pub fn from_env() -> Result<Self, ChatError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`HubConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr.parse::<SocketAddr>().map_err(|e| ChatError::InvalidConfig {
            key: "LISTEN_ADDR",
            reason: format!("{raw_addr:?}: {e}"),
        })?;

        let raw_origin =
            lookup("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&raw_origin).map_err(|e| ChatError::InvalidConfig {
                key: "ALLOWED_ORIGIN",
                reason: format!("{raw_origin:?}: {e}"),
            })?;

        Ok(Self {
            listen_addr,
            allowed_origin,
            hub_queue_capacity: parse_capacity(&lookup, "HUB_QUEUE_CAPACITY", 1024),
            outbound_queue_capacity: parse_capacity(&lookup, "OUTBOUND_QUEUE_CAPACITY", 256),
        })
    }
}

/// Terminal client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base HTTP or WebSocket URL of the hub.
    pub endpoint: String,
    /// How the client treats its own messages.
    pub echo_policy: EchoPolicy,
}

impl ClientConfig {
    /// Loads configuration from environment variables (`CHAT_ENDPOINT`,
    /// `CHAT_ECHO_POLICY`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidConfig`] for an unknown echo policy.
    pub fn from_env() -> Result<Self, ChatError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let endpoint = lookup("CHAT_ENDPOINT").unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string());
        let echo_policy = match lookup("CHAT_ECHO_POLICY") {
            Some(raw) => raw.parse::<EchoPolicy>().map_err(|reason| ChatError::InvalidConfig {
                key: "CHAT_ECHO_POLICY",
                reason,
            })?,
            None => EchoPolicy::default(),
        };
        Ok(Self {
            endpoint,
            echo_policy,
        })
    }
}

/// Parses a positive capacity, returning `default` on missing, invalid or
/// zero values.
fn parse_capacity(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: usize) -> usize {
    lookup(key)
        .and_then(|v| v.parse().ok())
        .filter(|&n: &usize| n > 0)
        .unwrap_or(default)
}

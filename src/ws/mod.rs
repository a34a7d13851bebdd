//! WebSocket layer: upgrade handler, connection loop, wire format.
//!
//! The endpoint at `/ws` carries chat messages in both directions.

pub mod connection;
pub mod handler;
pub mod messages;

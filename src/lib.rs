//! # chat-relay
//!
//! Minimal WebSocket chat: a hub that rebroadcasts every received message
//! to every connected client (the sender included), and a client that
//! connects under a display name, sends lines, and keeps a local log.
//!
//! There is no history, authentication, persistence, or routing beyond
//! "send to everyone". Delivery is best effort.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket)           HTTP
//!     │                           │
//!     ├── WS Handler (ws/)        ├── System routes (api/)
//!     │                           │
//!     └──────── HubHandle ────────┘
//!                   │
//!            Hub dispatcher (hub/)
//!                   │
//!            ConnectionSet (domain/)
//! ```
//!
//! The [`client`] module is the other end: a [`client::ChatSession`] state
//! machine driven by a [`client::ChatClient`] transport.

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod ws;

//! Shared application state injected into all Axum handlers.

use axum::http::HeaderValue;

use crate::hub::HubHandle;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Entry point into the broadcast hub.
    pub hub: HubHandle,
    /// The only browser origin allowed to call the server or open a socket.
    pub allowed_origin: HeaderValue,
}

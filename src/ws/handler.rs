//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::connection::run_connection;
use crate::app_state::AppState;

/// Query key carrying the display name.
pub const USER_NAME_PARAM: &str = "userName";

/// Returns the first `userName` value, or `""` when absent.
///
/// Duplicate keys and unrelated parameters are tolerated.
#[must_use]
pub fn user_name_from(params: Vec<(String, String)>) -> String {
    params
        .into_iter()
        .find_map(|(key, value)| (key == USER_NAME_PARAM).then_some(value))
        .unwrap_or_default()
}

/// Returns `true` unless the request carries an `Origin` other than
/// `allowed`. Non-browser clients send no `Origin` and are accepted.
#[must_use]
pub fn origin_permitted(headers: &HeaderMap, allowed: &HeaderValue) -> bool {
    headers
        .get(header::ORIGIN)
        .is_none_or(|origin| origin == allowed)
}

/// `GET /ws?userName=<name>` — Upgrade HTTP connection to WebSocket.
///
/// Handshakes from a foreign origin get `403 Forbidden`.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
    State(state): State<AppState>,
) -> Response {
    if !origin_permitted(&headers, &state.allowed_origin) {
        tracing::info!(
            origin = ?headers.get(header::ORIGIN),
            "rejected ws handshake from foreign origin"
        );
        return StatusCode::FORBIDDEN.into_response();
    }

    let user_name = user_name_from(params);
    let hub = state.hub;

    ws.on_upgrade(move |socket| run_connection(socket, hub, user_name))
}

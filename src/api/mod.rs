//! HTTP surface: system routes plus the WebSocket endpoint, wrapped in
//! CORS and request tracing.

pub mod system;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the complete application router.
///
/// Cross-origin requests are accepted only from `state.allowed_origin` and
/// only for `GET` and `POST`. The WebSocket handshake enforces the same
/// origin itself, since browsers skip CORS for upgrades.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(state.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST]);

    Router::new()
        .merge(system::routes())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::http::HeaderValue;
    use tower::ServiceExt;

    use super::*;
    use crate::hub::HubHandle;

    fn app() -> Router {
        let (hub, _task) = HubHandle::spawn(8, 8);
        build_app(AppState {
            hub,
            allowed_origin: HeaderValue::from_static("http://localhost:3000"),
        })
    }

    #[tokio::test]
    async fn root_returns_liveness_banner() {
        let Ok(request) = Request::builder().uri("/").body(Body::empty()) else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(bytes) = to_bytes(response.into_body(), 1024).await else {
            panic!("body");
        };
        assert_eq!(bytes.as_ref(), system::LIVENESS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn health_reports_zero_connections() {
        let Ok(request) = Request::builder().uri("/health").body(Body::empty()) else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(response.status(), StatusCode::OK);

        let Ok(bytes) = to_bytes(response.into_body(), 1024).await else {
            panic!("body");
        };
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap_or_default();
        assert_eq!(value.get("status"), Some(&serde_json::json!("healthy")));
        assert_eq!(value.get("connections"), Some(&serde_json::json!(0)));
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_only() {
        let Ok(request) = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
        else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );

        // The exact-origin policy never echoes a foreign origin back.
        let Ok(request) = Request::builder()
            .uri("/")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
        else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:3000"))
        );
    }

    #[tokio::test]
    async fn preflight_lists_only_get_and_post() {
        let Ok(request) = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
        else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };

        let Some(allowed) = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
        else {
            panic!("preflight should list allowed methods");
        };
        let methods: Vec<&str> = allowed.split(',').map(str::trim).collect();
        assert!(methods.contains(&"GET"));
        assert!(methods.contains(&"POST"));
        assert!(!methods.contains(&"DELETE"));
    }

    #[tokio::test]
    async fn ws_route_rejects_plain_get() {
        let Ok(request) = Request::builder().uri("/ws?userName=alice").body(Body::empty()) else {
            panic!("request");
        };
        let Ok(response) = app().oneshot(request).await else {
            panic!("router is infallible");
        };
        assert!(response.status().is_client_error());
    }
}

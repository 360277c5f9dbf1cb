//! # shelfmark-server
//!
//! HTTP surface of the counter: checkout, payments, invoice reprints,
//! label sheets and product QR codes.
//!
//! ## Routes
//! ```text
//! POST /api/sales/checkout             cart → SaleSummary
//! PUT  /api/sales/:sale_id/payment     PaymentUpdate → PaymentReceipt
//! GET  /api/sales/:sale_id/invoice     invoice PDF
//! POST /api/labels                     label sheet PDF
//! GET  /api/products/:product_code     product lookup for the scanner
//! GET  /api/qr/:product_code           QR image of the public product page
//! GET  /health                         liveness + database check
//! ```

pub mod config;
pub mod encoders;
pub mod error;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorCode};
pub use state::{AppState, SharedState};

/// The full application: routes, request tracing, CORS (any origin), state.
pub fn app(state: SharedState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_preflight_from_client_origin() {
        let app = TestApp::new().await;

        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/sales/checkout")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn test_simple_request_carries_allow_origin() {
        let app = TestApp::new().await;

        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}

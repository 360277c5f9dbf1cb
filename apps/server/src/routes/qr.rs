//! # QR Routes
//!
//! QR code pointing at a product's public page, for shelf cards.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use shelfmark_docs::product_public_url;

use crate::error::ApiError;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/qr/:product_code", get(product_qr))
}

async fn product_qr(
    State(state): State<SharedState>,
    Path(product_code): Path<String>,
) -> Result<Response, ApiError> {
    let code = product_code.trim();
    let product = state
        .db
        .products()
        .get_by_code(code)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", code))?;

    let url = product_public_url(&state.client_base_url, &product.product_code)
        .ok_or_else(|| ApiError::internal("client base URL cannot carry a path"))?;
    let image = state.qr.encode(url.as_str()).map_err(ApiError::internal)?;

    Ok(([(header::CONTENT_TYPE, image.mime_type)], image.bytes).into_response())
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use axum::http::{header, StatusCode};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_product_qr() {
        let app = TestApp::new().await;
        app.stock("SAREE 01", "Silk Saree", dec!(1499.5), 4).await;

        let response = app.get("/api/qr/SAREE%2001").await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[header::CONTENT_TYPE], "image/svg+xml");
        assert_eq!(
            String::from_utf8(response.body).unwrap(),
            "<svg>http://localhost:5173/p/SAREE%2001</svg>"
        );
    }

    #[tokio::test]
    async fn test_unknown_product_qr() {
        let app = TestApp::new().await;

        let response = app.get("/api/qr/NOPE").await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}

//! # Product Routes
//!
//! Lookup by code, used when the counter scans a sticker.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use shelfmark_core::Product;

use crate::error::ApiError;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/products/:product_code", get(get_product))
}

async fn get_product(
    State(state): State<SharedState>,
    Path(product_code): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let code = product_code.trim();
    let product = state
        .db
        .products()
        .get_by_code(code)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", code))?;

    Ok(Json(product))
}

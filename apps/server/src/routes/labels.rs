//! # Label Routes
//!
//! Printable barcode sticker sheets.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use shelfmark_docs::LabelRequest;
use tracing::debug;

use super::document_response;
use crate::error::ApiError;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
struct LabelSheetRequest {
    #[serde(default)]
    items: Vec<LabelRequest>,
}

pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/labels", post(label_sheet))
}

async fn label_sheet(
    State(state): State<SharedState>,
    payload: Result<Json<LabelSheetRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    debug!(lines = request.items.len(), "label_sheet request");

    let mut codes: Vec<String> = Vec::new();
    for item in &request.items {
        let code = item.product_code.trim();
        if !code.is_empty() && !codes.iter().any(|c| c == code) {
            codes.push(code.to_string());
        }
    }

    let products = state.db.products().find_by_codes(&codes).await?;
    let doc = state.labels.render(&request.items, &products)?;

    document_response(&doc, "labels")
}

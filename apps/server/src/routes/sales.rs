//! # Sale Routes
//!
//! Checkout, later payments and invoice reprints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use shelfmark_core::{CheckoutRequest, PaymentReceipt, PaymentUpdate, SaleSummary};
use tracing::debug;

use super::document_response;
use crate::error::ApiError;
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/sales/checkout", post(checkout))
        .route("/api/sales/:sale_id/payment", put(update_payment))
        .route("/api/sales/:sale_id/invoice", get(invoice))
}

async fn checkout(
    State(state): State<SharedState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<SaleSummary>, ApiError> {
    let Json(request) = payload?;
    debug!(lines = request.items.len(), "checkout request");

    let summary = state.checkout.checkout(&request).await?;
    Ok(Json(summary))
}

async fn update_payment(
    State(state): State<SharedState>,
    Path(sale_id): Path<String>,
    payload: Result<Json<PaymentUpdate>, JsonRejection>,
) -> Result<Json<PaymentReceipt>, ApiError> {
    let Json(update) = payload?;
    debug!(sale_id = %sale_id, "update_payment request");

    let receipt = state.payments.update_payment(&sale_id, &update).await?;
    Ok(Json(receipt))
}

async fn invoice(
    State(state): State<SharedState>,
    Path(sale_id): Path<String>,
) -> Result<Response, ApiError> {
    let sale = state
        .db
        .sales()
        .get(&sale_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &sale_id))?;

    let doc = state.invoices.render(&sale);
    document_response(&doc, &sale.invoice_no)
}

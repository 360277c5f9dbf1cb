//! # Routes
//!
//! Handlers are thin: parse, delegate to an engine or renderer, map the
//! error. Each submodule contributes its own `Router`.

pub mod health;
pub mod labels;
pub mod products;
pub mod qr;
pub mod sales;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Router;
use shelfmark_docs::{Document, DOCUMENT_CONTENT_TYPE};

use crate::error::ApiError;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .merge(sales::routes())
        .merge(labels::routes())
        .merge(products::routes())
        .merge(qr::routes())
        .merge(health::routes())
}

/// Writes a rendered document out as `<stem>.pdf`, shown inline.
fn document_response(doc: &Document, stem: &str) -> Result<Response, ApiError> {
    let bytes = doc.to_bytes()?;

    Ok((
        [
            (header::CONTENT_TYPE, DOCUMENT_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{stem}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Shelfmark                              │
//! │                                                                         │
//! │  Handler → Result<T, ApiError>                                         │
//! │                                                                         │
//! │  DbError::Domain(CoreError::…) ─┐                                       │
//! │  DbError::WriteConflict ────────┤                                       │
//! │  DocError::…  ──────────────────┼──► ApiError ──► (status, JSON body)  │
//! │  JsonRejection ─────────────────┘                                       │
//! │                                                                         │
//! │  Validation → 400   NotFound → 404   Conflict → 409   Internal → 500   │
//! │                                                                         │
//! │  Internal details are logged, never sent to the client.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use shelfmark_core::CoreError;
use shelfmark_db::DbError;
use shelfmark_docs::DocError;

/// Error body returned by every failing request.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for A (Silk Saree): available 2, requested 5",
///   "productCode": "A",
///   "available": 2,
///   "requested": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Unresolved product codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<i64>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Not enough stock for a line (409)
    InsufficientStock,

    /// Lost a race with a concurrent write; resubmit (409)
    Conflict,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
            missing: None,
            product_code: None,
            available: None,
            requested: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            StatusCode::NOT_FOUND,
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, ErrorCode::ValidationError, message)
    }

    /// Logs `detail` and returns a generic 500.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Internal error");
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Internal,
            "Internal server error",
        )
    }

    fn with_missing(mut self, missing: Vec<String>) -> Self {
        self.missing = Some(missing);
        self
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ProductsNotFound(missing) => {
                ApiError::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
                    .with_missing(missing)
            }
            CoreError::SaleNotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
            }
            CoreError::InsufficientStock {
                product_code,
                available,
                requested,
                ..
            } => ApiError {
                product_code: Some(product_code),
                available: Some(available),
                requested: Some(requested),
                ..ApiError::new(StatusCode::CONFLICT, ErrorCode::InsufficientStock, message)
            },
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::AmountOutOfRange => ApiError::validation(message),
        }
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Domain(core) => core.into(),
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            conflict @ (DbError::WriteConflict(_) | DbError::UniqueViolation { .. }) => {
                tracing::warn!(error = %conflict, "Write conflict");
                ApiError::new(
                    StatusCode::CONFLICT,
                    ErrorCode::Conflict,
                    "Another checkout changed the same data; please retry",
                )
            }
            other => ApiError::internal(other),
        }
    }
}

/// Converts rendering errors to API errors.
///
/// Unknown label codes are a bad request here, not a 404: the sheet as a
/// whole is what was asked for.
impl From<DocError> for ApiError {
    fn from(err: DocError) -> Self {
        match err {
            DocError::ProductsNotFound(missing) => ApiError::validation(format!(
                "Some product codes were not found: {}",
                missing.join(", ")
            ))
            .with_missing(missing),
            invalid @ (DocError::EmptyRequest | DocError::BlankCode { .. }) => {
                ApiError::validation(invalid.to_string())
            }
            broken @ (DocError::Encode(_) | DocError::Pdf(_)) => ApiError::internal(broken),
        }
    }
}

/// Malformed or mistyped JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

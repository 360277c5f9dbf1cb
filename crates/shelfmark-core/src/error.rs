//! # Error Types
//!
//! Domain-specific error types for shelfmark-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelfmark-core errors (this file)                                     │
//! │  ├── CoreError        - Domain errors (missing products, stock, ...)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  shelfmark-docs: DocError   shelfmark-db: DbError                      │
//! │                                                                         │
//! │  apps/server: ApiError - What the HTTP client sees (serialized)        │
//! │                                                                         │
//! │  Every layer answers `kind()` with one of four ErrorKinds, which the   │
//! │  server maps to 400 / 404 / 409 / 500.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification shared by every error type in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller sent something unusable (empty cart, blank code, ...).
    Validation,
    /// A product code or sale id does not resolve.
    NotFound,
    /// The request is valid but loses against current state (stock).
    Conflict,
    /// Persistence or encoding failure.
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more product codes do not exist.
    ///
    /// Always lists every missing code so the cashier can fix the cart in
    /// one pass.
    #[error("Products not found: {}", .0.join(", "))]
    ProductsNotFound(Vec<String>),

    /// Sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Insufficient stock to complete a checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (SHIRT-01 × 5)
    ///      │
    ///      ▼
    /// Check stock: available=2
    ///      │
    ///      ▼
    /// InsufficientStock { product_code: "SHIRT-01", available: 2, requested: 5 }
    ///      │
    ///      ▼
    /// Nothing is decremented, no sale is written
    /// ```
    #[error("Insufficient stock for {product_code} ({name}): available {available}, requested {requested}")]
    InsufficientStock {
        product_code: String,
        name: String,
        available: i64,
        requested: i64,
    },

    /// A line total or bill amount does not fit the decimal range.
    #[error("Bill amount out of range")]
    AmountOutOfRange,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Classifies the error for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::ProductsNotFound(_) | CoreError::SaleNotFound(_) => ErrorKind::NotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::Conflict,
            CoreError::Validation(_) | CoreError::AmountOutOfRange => ErrorKind::Validation,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// A list that must contain at least one entry is empty.
    #[error("{field} must not be empty")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

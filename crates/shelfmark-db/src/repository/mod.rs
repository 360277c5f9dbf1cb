//! # Repository Module
//!
//! Database repository implementations for Shelfmark.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler / CheckoutEngine                                         │
//! │       │                                                                 │
//! │       │  db.products().get_by_code("SAREE-001")                        │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_code(&self, code)             pool                         │
//! │  ├── find_by_codes(&self, codes)          pool                         │
//! │  ├── find_by_codes_in(&self, conn, codes) inside a transaction         │
//! │  └── decrement_stock(&self, conn, ...)    inside a transaction         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Methods that take a `&mut SqliteConnection` are meant to run inside a
//! caller-owned transaction (`&mut *tx`); the rest use the pool directly.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product lookup, insert, stock decrement
//! - [`SaleRepository`](sale::SaleRepository) - Sale and sale item operations

pub mod product;
pub mod sale;

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

/// Amounts live in TEXT columns; this is the only way back to a Decimal.
pub(crate) fn parse_decimal(column: &str, value: &str) -> DbResult<Decimal> {
    Decimal::from_str(value).map_err(|_| DbError::decode(column, value))
}

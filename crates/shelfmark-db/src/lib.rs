//! # shelfmark-db: Database Layer for Shelfmark
//!
//! SQLite storage for products and sales, plus the two write paths that
//! need a transaction: checkout and payment updates.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelfmark Data Flow                              │
//! │                                                                         │
//! │  HTTP handler (POST /api/sales/checkout)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shelfmark-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ ProductRepo   │    │  (embedded)  │  │   │
//! │  │   │               │◄───│ SaleRepo      │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────▲───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │              CheckoutEngine ───┤                               │   │
//! │  │              PaymentUpdater ───┘                               │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Product and sale repositories
//! - [`checkout`] - Transactional checkout
//! - [`payment`] - Payment updates on existing sales
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelfmark_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("shop.db")).await?;
//! let summary = db.checkout(Arc::new(SystemClock)).checkout(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod payment;
pub mod pool;
pub mod repository;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::CheckoutEngine;
pub use error::{DbError, DbResult};
pub use payment::PaymentUpdater;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;

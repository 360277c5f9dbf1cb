//! # shelfmark-core: Pure Business Logic for Shelfmark
//!
//! This crate is the **heart** of the billing counter. It contains the money
//! type, the bill arithmetic, checkout planning and payment settlement as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shelfmark Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (apps/server)                       │   │
//! │  │    checkout ──► update payment ──► invoice ──► label sheet     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ shelfmark-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Money   │  │ BillTotals│  │ plan_sale │  │   │
//! │  │   │   Sale    │  │  Percent  │  │           │  │  payment  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO SYSTEM CLOCK          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                     │                              │                    │
//! │  ┌──────────────────▼──────────┐   ┌───────────────▼────────────────┐  │
//! │  │   shelfmark-db (SQLite)     │   │   shelfmark-docs (rendering)   │  │
//! │  └─────────────────────────────┘   └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleItem)
//! - [`money`] - `Money` and `Percent` over exact decimals (no floating point!)
//! - [`billing`] - The fixed-order bill computation
//! - [`checkout`] - Cart validation and sale planning
//! - [`payment`] - Deferred/partial payment settlement
//! - [`clock`] - Injectable time source
//! - [`invoice`] - Invoice number formatting
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use shelfmark_core::billing::BillTotals;
//! use shelfmark_core::{Money, Percent};
//!
//! let totals = BillTotals::compute(
//!     [Money::new(dec!(1000))],
//!     Percent::new(dec!(10)),
//!     Percent::new(dec!(5)),
//!     Money::new(dec!(500)),
//! )
//! .unwrap();
//!
//! assert_eq!(totals.total_amount, Money::new(dec!(945)));
//! assert_eq!(totals.balance_due, Money::new(dec!(445)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod checkout;
pub mod clock;
pub mod error;
pub mod invoice;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutLine, CheckoutRequest};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::{Money, Percent};
pub use payment::{PaymentReceipt, PaymentUpdate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Payment method recorded when the cashier leaves the field blank.
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";

/// Maximum length of a product code.
pub const MAX_PRODUCT_CODE_LEN: usize = 64;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Generates a fresh entity id (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

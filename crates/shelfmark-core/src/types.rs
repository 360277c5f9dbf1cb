//! # Domain Types
//!
//! Core domain types used throughout Shelfmark.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  product_code   │   │  invoice_no     │   │  sale_id        │       │
//! │  │  name, price    │   │  totals (Money) │   │  name snapshot  │       │
//! │  │  quantity       │   │  items ─────────┼──►│  price snapshot │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (product_code, invoice_no) - human-readable, printed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::{Money, Percent};

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Shop-assigned code, unique across the catalog.
    pub product_code: String,

    /// Display name shown to cashier and on the invoice.
    pub name: String,

    /// Unit selling price.
    pub price: Money,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Value printed as the barcode, when it differs from the code.
    pub barcode_value: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The text encoded on this product's sticker barcode.
    ///
    /// ## Example
    /// ```rust
    /// # use chrono::Utc;
    /// # use shelfmark_core::{Money, Product};
    /// let mut product = Product {
    ///     id: "p1".into(),
    ///     product_code: "SHIRT-01".into(),
    ///     name: "Cotton Shirt".into(),
    ///     price: Money::zero(),
    ///     quantity: 1,
    ///     barcode_value: Some("  ".into()),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    /// assert_eq!(product.barcode_payload(), "SHIRT-01");
    ///
    /// product.barcode_value = Some("8901234567890".into());
    /// assert_eq!(product.barcode_payload(), "8901234567890");
    /// ```
    pub fn barcode_payload(&self) -> &str {
        match self.barcode_value.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => &self.product_code,
        }
    }

    /// Checks whether `quantity` units can leave the shelf.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A billed sale.
///
/// Financial fields are frozen at checkout. Afterwards only `paid_amount`,
/// `payment_method`, `balance_due` and `updated_at` ever change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub invoice_no: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub gst_percent: Percent,
    pub discount_percent: Percent,
    pub discount_amount: Money,
    pub paid_amount: Money,
    pub payment_method: String,
    pub subtotal: Money,
    pub taxable_amount: Money,
    pub gst_amount: Money,
    pub total_amount: Money,
    pub balance_due: Money,
    /// Lines in the order they were scanned.
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// The short acknowledgement returned to the counter after checkout.
    pub fn summary(&self) -> SaleSummary {
        SaleSummary {
            sale_id: self.id.clone(),
            invoice_no: self.invoice_no.clone(),
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
            balance_due: self.balance_due,
        }
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    /// Back-reference to the owning sale.
    pub sale_id: String,
    /// Code at time of sale (frozen).
    pub product_code: String,
    /// Product name at time of sale (frozen).
    pub name: String,
    pub quantity: i64,
    /// Unit price at time of sale (frozen).
    pub unit_price: Money,
    /// `unit_price × quantity`.
    pub line_total: Money,
}

// =============================================================================
// Sale Summary
// =============================================================================

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSummary {
    pub sale_id: String,
    pub invoice_no: String,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub balance_due: Money,
}

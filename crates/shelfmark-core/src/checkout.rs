//! # Checkout Planning
//!
//! The pure half of a checkout: everything except reading and writing the
//! database.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutRequest                                                        │
//! │       │                                                                 │
//! │       ▼  validate()          empty cart / blank code → Validation       │
//! │  Cart (trimmed lines, qty ≥ 1)                                          │
//! │       │                                                                 │
//! │       ▼  distinct_codes()    one lookup per code (shelfmark-db)         │
//! │  [Product]                                                              │
//! │       │                                                                 │
//! │       ▼  plan_sale()         missing codes → NotFound                   │
//! │                              cumulative demand > stock → Conflict       │
//! │  Sale (items snapshotted, totals computed, not yet persisted)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::billing::BillTotals;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Percent};
use crate::types::{Product, Sale, SaleItem};
use crate::validation::{
    normalize_optional, normalize_payment_method, validate_product_code, ValidationResult,
};

// =============================================================================
// Request Types
// =============================================================================

/// One scanned line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    pub product_code: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// A cart submitted for billing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutLine>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub gst_percent: Percent,
    #[serde(default)]
    pub discount_percent: Percent,
    #[serde(default)]
    pub paid_amount: Money,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// A validated, normalized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_code: String,
    pub quantity: i64,
}

/// The validated cart, lines in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Product codes in first-seen order, each once.
    pub fn distinct_codes(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.lines
            .iter()
            .filter(|line| seen.insert(line.product_code.as_str()))
            .map(|line| line.product_code.clone())
            .collect()
    }
}

impl CheckoutRequest {
    /// Checks the cart shape and normalizes every line.
    ///
    /// Quantities below 1 are raised to 1. Duplicate codes stay separate
    /// lines.
    pub fn validate(&self) -> ValidationResult<Cart> {
        if self.items.is_empty() {
            return Err(ValidationError::Empty {
                field: "items".to_string(),
            });
        }

        let lines = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let field = format!("items[{}].productCode", i);
                let code = validate_product_code(&item.product_code, &field)?;
                Ok(CartLine {
                    product_code: code.to_string(),
                    quantity: item.quantity.max(1),
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        Ok(Cart { lines })
    }
}

// =============================================================================
// Sale Planning
// =============================================================================

/// Identity and time for the sale being planned.
#[derive(Debug, Clone)]
pub struct SaleContext {
    pub sale_id: String,
    pub invoice_no: String,
    pub now: DateTime<Utc>,
}

/// Builds the sale a checkout would persist, or explains why it can't.
///
/// `products` must hold whatever the store returned for
/// [`Cart::distinct_codes`]; extra entries are ignored. `next_item_id`
/// supplies one id per line.
///
/// All checks run before anything is produced:
/// 1. every code resolves, otherwise [`CoreError::ProductsNotFound`] with
///    all missing codes in request order
/// 2. demand summed per code across lines never exceeds stock, otherwise
///    [`CoreError::InsufficientStock`] for the first offending line, with
///    `available` reduced by earlier lines of the same code
pub fn plan_sale(
    request: &CheckoutRequest,
    cart: &Cart,
    products: &[Product],
    ctx: SaleContext,
    mut next_item_id: impl FnMut() -> String,
) -> CoreResult<Sale> {
    let by_code: HashMap<&str, &Product> = products
        .iter()
        .map(|p| (p.product_code.as_str(), p))
        .collect();

    let missing: Vec<String> = cart
        .distinct_codes()
        .into_iter()
        .filter(|code| !by_code.contains_key(code.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::ProductsNotFound(missing));
    }

    let mut demand: HashMap<&str, i64> = HashMap::new();
    let mut items = Vec::with_capacity(cart.lines.len());

    for line in &cart.lines {
        let product = by_code
            .get(line.product_code.as_str())
            .copied()
            .ok_or_else(|| CoreError::ProductsNotFound(vec![line.product_code.clone()]))?;
        let already = demand.entry(product.product_code.as_str()).or_insert(0);

        // A sum past i64::MAX can never be in stock
        let wanted = match already.checked_add(line.quantity) {
            Some(total) if product.can_sell(total) => total,
            _ => {
                return Err(CoreError::InsufficientStock {
                    product_code: product.product_code.clone(),
                    name: product.name.clone(),
                    available: (product.quantity - *already).max(0),
                    requested: line.quantity,
                })
            }
        };
        *already = wanted;

        items.push(SaleItem {
            id: next_item_id(),
            sale_id: ctx.sale_id.clone(),
            product_code: product.product_code.clone(),
            name: product.name.clone(),
            quantity: line.quantity,
            unit_price: product.price,
            line_total: product
                .price
                .checked_mul(line.quantity)
                .ok_or(CoreError::AmountOutOfRange)?,
        });
    }

    let totals = BillTotals::compute(
        items.iter().map(|item| item.line_total),
        request.discount_percent,
        request.gst_percent,
        request.paid_amount,
    )?;

    Ok(Sale {
        id: ctx.sale_id,
        invoice_no: ctx.invoice_no,
        created_at: ctx.now,
        updated_at: ctx.now,
        customer_name: normalize_optional(request.customer_name.as_deref()),
        customer_phone: normalize_optional(request.customer_phone.as_deref()),
        gst_percent: totals.gst_percent,
        discount_percent: totals.discount_percent,
        discount_amount: totals.discount_amount,
        paid_amount: totals.paid_amount,
        payment_method: normalize_payment_method(request.payment_method.as_deref()),
        subtotal: totals.subtotal,
        taxable_amount: totals.taxable_amount,
        gst_amount: totals.gst_amount,
        total_amount: totals.total_amount,
        balance_due: totals.balance_due,
        items,
    })
}

/// Quantity per code a planned sale takes off the shelf, first-seen order.
///
/// Sums saturate at `i64::MAX`, which no conditional decrement can satisfy.
pub fn stock_demand(sale: &Sale) -> Vec<(String, i64)> {
    let mut order: Vec<(String, i64)> = Vec::new();
    for item in &sale.items {
        match order.iter_mut().find(|(code, _)| *code == item.product_code) {
            Some((_, qty)) => *qty = qty.saturating_add(item.quantity),
            None => order.push((item.product_code.clone(), item.quantity)),
        }
    }
    order
}

// =============================================================================
// Unit Tests
// =============================================================================

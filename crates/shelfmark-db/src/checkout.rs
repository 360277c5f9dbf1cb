//! # Checkout Engine
//!
//! Turns a counter cart into a persisted sale.
//!
//! ## Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request.validate()                  (no database touched yet)          │
//! │       │                                                                 │
//! │  BEGIN IMMEDIATE ───────────────────────────────────────────────────┐   │
//! │  │ find_by_codes_in(distinct codes)                                 │   │
//! │  │ count_invoices_with_prefix(INV-YYYYMMDD-HHMMSS)                  │   │
//! │  │ plan_sale(...)      NotFound / InsufficientStock → ROLLBACK      │   │
//! │  │ decrement_stock(code, qty) per code   0 rows → ROLLBACK          │   │
//! │  │ insert_with_items(sale)                                          │   │
//! │  COMMIT ────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │  SaleSummary                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any error drops the transaction, which rolls it back: stock is never
//! decremented without the sale that explains it.
//!
//! The write lock is taken at `BEGIN`, so concurrent checkouts queue on
//! `busy_timeout` instead of failing their first write. A wait that runs
//! out comes back as [`DbError::WriteConflict`].

use shelfmark_core::checkout::{plan_sale, stock_demand, SaleContext};
use shelfmark_core::invoice::{invoice_number, invoice_prefix};
use shelfmark_core::{new_id, CheckoutRequest, Clock, CoreError, SaleSummary};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;

/// Runs checkouts against the database.
#[derive(Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
    products: ProductRepository,
    sales: SaleRepository,
    clock: Arc<dyn Clock>,
}

impl CheckoutEngine {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        CheckoutEngine {
            products: ProductRepository::new(pool.clone()),
            sales: SaleRepository::new(pool.clone()),
            pool,
            clock,
        }
    }

    /// Validates, prices and persists a sale, taking its items off stock.
    ///
    /// ## Errors
    /// * `Domain(Validation)` - empty cart or blank product code
    /// * `Domain(ProductsNotFound)` - every unknown code, request order
    /// * `Domain(InsufficientStock)` - first line whose cumulative demand exceeds stock
    /// * `WriteConflict` / `UniqueViolation` - lost a race with another checkout
    pub async fn checkout(&self, request: &CheckoutRequest) -> DbResult<SaleSummary> {
        let cart = request.validate()?;
        let codes = cart.distinct_codes();

        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let products = self.products.find_by_codes_in(&mut tx, &codes).await?;

        let now = self.clock.now();
        let existing = self
            .sales
            .count_invoices_with_prefix(&mut tx, &invoice_prefix(now))
            .await?;
        let ctx = SaleContext {
            sale_id: new_id(),
            invoice_no: invoice_number(now, u32::try_from(existing).unwrap_or(u32::MAX)),
            now,
        };

        let sale = match plan_sale(request, &cart, &products, ctx, new_id) {
            Ok(sale) => sale,
            Err(err) => {
                warn!(error = %err, lines = cart.lines.len(), "Checkout rejected");
                return Err(err.into());
            }
        };

        for (code, quantity) in stock_demand(&sale) {
            let taken = self
                .products
                .decrement_stock(&mut tx, &code, quantity, now)
                .await?;
            if !taken {
                let current = self
                    .products
                    .find_by_codes_in(&mut tx, std::slice::from_ref(&code))
                    .await?;
                let (name, available) = current
                    .first()
                    .map(|p| (p.name.clone(), p.quantity))
                    .unwrap_or_default();

                warn!(code = %code, requested = quantity, available, "Stock changed during checkout");
                return Err(DbError::Domain(CoreError::InsufficientStock {
                    product_code: code,
                    name,
                    available,
                    requested: quantity,
                }));
            }
        }

        self.sales.insert_with_items(&mut tx, &sale).await?;
        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            invoice_no = %sale.invoice_no,
            total = %sale.total_amount,
            items = sale.items.len(),
            "Checkout complete"
        );

        Ok(sale.summary())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Sale Repository
//!
//! Database operations for sales and their items.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Lifecycle                                       │
//! │                                                                         │
//! │  checkout ──► insert_with_items (sale row + N item rows, one tx)       │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │               fetch / get  ──► invoice rendering                        │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │            update_payment (paid, method, balance, updated_at only)     │
//! │                                                                         │
//! │  Items are written once and never touched again.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use shelfmark_core::{Money, Percent, Sale, SaleItem};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use tracing::debug;

use super::parse_decimal;
use crate::error::{DbError, DbResult};

#[derive(Debug, FromRow)]
struct SaleRow {
    id: String,
    invoice_no: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    gst_percent: String,
    discount_percent: String,
    discount_amount: String,
    paid_amount: String,
    payment_method: String,
    subtotal: String,
    taxable_amount: String,
    gst_amount: String,
    total_amount: String,
    balance_due: String,
}

#[derive(Debug, FromRow)]
struct SaleItemRow {
    id: String,
    sale_id: String,
    product_code: String,
    name: String,
    quantity: i64,
    unit_price: String,
    line_total: String,
}

fn money(column: &str, value: &str) -> DbResult<Money> {
    parse_decimal(column, value).map(Money::new)
}

fn percent(column: &str, value: &str) -> DbResult<Percent> {
    parse_decimal(column, value).map(Percent::new)
}

impl TryFrom<SaleItemRow> for SaleItem {
    type Error = DbError;

    fn try_from(row: SaleItemRow) -> DbResult<Self> {
        Ok(SaleItem {
            unit_price: money("sale_items.unit_price", &row.unit_price)?,
            line_total: money("sale_items.line_total", &row.line_total)?,
            id: row.id,
            sale_id: row.sale_id,
            product_code: row.product_code,
            name: row.name,
            quantity: row.quantity,
        })
    }
}

impl SaleRow {
    fn into_sale(self, items: Vec<SaleItem>) -> DbResult<Sale> {
        Ok(Sale {
            gst_percent: percent("sales.gst_percent", &self.gst_percent)?,
            discount_percent: percent("sales.discount_percent", &self.discount_percent)?,
            discount_amount: money("sales.discount_amount", &self.discount_amount)?,
            paid_amount: money("sales.paid_amount", &self.paid_amount)?,
            subtotal: money("sales.subtotal", &self.subtotal)?,
            taxable_amount: money("sales.taxable_amount", &self.taxable_amount)?,
            gst_amount: money("sales.gst_amount", &self.gst_amount)?,
            total_amount: money("sales.total_amount", &self.total_amount)?,
            balance_due: money("sales.balance_due", &self.balance_due)?,
            id: self.id,
            invoice_no: self.invoice_no,
            created_at: self.created_at,
            updated_at: self.updated_at,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            payment_method: self.payment_method,
            items,
        })
    }
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Persists a sale and all its items.
    ///
    /// Run it inside the checkout transaction so the sale and its items
    /// land together or not at all.
    pub async fn insert_with_items(&self, conn: &mut SqliteConnection, sale: &Sale) -> DbResult<()> {
        debug!(sale_id = %sale.id, invoice_no = %sale.invoice_no, items = sale.items.len(), "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, invoice_no, created_at, updated_at,
                customer_name, customer_phone,
                gst_percent, discount_percent, discount_amount,
                paid_amount, payment_method,
                subtotal, taxable_amount, gst_amount, total_amount, balance_due
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.invoice_no)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .bind(&sale.customer_name)
        .bind(&sale.customer_phone)
        .bind(sale.gst_percent.value().to_string())
        .bind(sale.discount_percent.value().to_string())
        .bind(sale.discount_amount.amount().to_string())
        .bind(sale.paid_amount.amount().to_string())
        .bind(&sale.payment_method)
        .bind(sale.subtotal.amount().to_string())
        .bind(sale.taxable_amount.amount().to_string())
        .bind(sale.gst_amount.amount().to_string())
        .bind(sale.total_amount.amount().to_string())
        .bind(sale.balance_due.amount().to_string())
        .execute(&mut *conn)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: sale.invoice_no.clone(),
            },
            other => other,
        })?;

        for (line_no, item) in sale.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, line_no, product_code, name,
                    quantity, unit_price, line_total
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&item.id)
            .bind(&sale.id)
            .bind(line_no as i64)
            .bind(&item.product_code)
            .bind(&item.name)
            .bind(item.quantity)
            .bind(item.unit_price.amount().to_string())
            .bind(item.line_total.amount().to_string())
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Gets a sale with its items, in the order they were billed.
    pub async fn get(&self, id: &str) -> DbResult<Option<Sale>> {
        let mut conn = self.pool.acquire().await?;
        self.fetch_in(&mut conn, id).await
    }

    /// Same as [`get`](Self::get) on a caller-owned connection or transaction.
    pub async fn fetch_in(&self, conn: &mut SqliteConnection, id: &str) -> DbResult<Option<Sale>> {
        debug!(sale_id = %id, "Fetching sale");

        let row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT
                id, invoice_no, created_at, updated_at,
                customer_name, customer_phone,
                gst_percent, discount_percent, discount_amount,
                paid_amount, payment_method,
                subtotal, taxable_amount, gst_amount, total_amount, balance_due
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItemRow>(
            r#"
            SELECT id, sale_id, product_code, name, quantity, unit_price, line_total
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY line_no
            "#,
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .map(SaleItem::try_from)
        .collect::<DbResult<Vec<_>>>()?;

        row.into_sale(items).map(Some)
    }

    /// How many invoice numbers already use `prefix`, bare or suffixed.
    pub async fn count_invoices_with_prefix(
        &self,
        conn: &mut SqliteConnection,
        prefix: &str,
    ) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sales WHERE invoice_no = ?1 OR invoice_no LIKE ?1 || '-%'",
        )
        .bind(prefix)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count)
    }

    /// Writes the payment fields of `sale` back. Nothing else is touched.
    ///
    /// ## Returns
    /// * `Ok(true)` - row updated
    /// * `Ok(false)` - no sale with that id
    pub async fn update_payment(&self, conn: &mut SqliteConnection, sale: &Sale) -> DbResult<bool> {
        debug!(sale_id = %sale.id, paid = %sale.paid_amount, "Updating sale payment");

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                paid_amount = ?2,
                payment_method = ?3,
                balance_due = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&sale.id)
        .bind(sale.paid_amount.amount().to_string())
        .bind(&sale.payment_method)
        .bind(sale.balance_due.amount().to_string())
        .bind(sale.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts all sales.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

//! # Payment Updater
//!
//! Records a later payment against an existing sale. Only the payment
//! columns change; stock and items are never touched.

use shelfmark_core::{Clock, CoreError, PaymentReceipt, PaymentUpdate};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::repository::sale::SaleRepository;

#[derive(Clone)]
pub struct PaymentUpdater {
    pool: SqlitePool,
    sales: SaleRepository,
    clock: Arc<dyn Clock>,
}

impl PaymentUpdater {
    pub fn new(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        PaymentUpdater {
            sales: SaleRepository::new(pool.clone()),
            pool,
            clock,
        }
    }

    /// Sets the paid amount (clamped to `[0, total]`) and, when non-blank,
    /// the payment method of `sale_id`.
    ///
    /// ## Errors
    /// * `Domain(SaleNotFound)` - no such sale
    pub async fn update_payment(
        &self,
        sale_id: &str,
        update: &PaymentUpdate,
    ) -> DbResult<PaymentReceipt> {
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let mut sale = self
            .sales
            .fetch_in(&mut tx, sale_id)
            .await?
            .ok_or_else(|| DbError::Domain(CoreError::SaleNotFound(sale_id.to_string())))?;

        let receipt = sale.settle_payment(update, self.clock.now());

        if !self.sales.update_payment(&mut tx, &sale).await? {
            return Err(DbError::Domain(CoreError::SaleNotFound(sale_id.to_string())));
        }
        tx.commit().await?;

        info!(
            sale_id = %sale.id,
            paid = %receipt.paid_amount,
            balance_due = %receipt.balance_due,
            method = %sale.payment_method,
            "Payment updated"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::test_support::{created, quantity_of, sale, stock};
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use shelfmark_core::{ErrorKind, FixedClock, Money};

    async fn seeded() -> (Database, Arc<FixedClock>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        stock(&db, "A", dec!(300), 3).await;
        let mut conn = db.pool().acquire().await.unwrap();
        db.sales()
            .insert_with_items(&mut conn, &sale("sale-1", "INV-20240301-090000"))
            .await
            .unwrap();
        drop(conn);

        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 5, 11, 30, 0).unwrap(),
        ));
        (db, clock)
    }

    #[tokio::test]
    async fn test_payment_changes_only_payment_fields() {
        let (db, clock) = seeded().await;
        let before = db.sales().get("sale-1").await.unwrap().unwrap();

        let receipt = db
            .payments(clock.clone())
            .update_payment(
                "sale-1",
                &PaymentUpdate {
                    paid_amount: Money::new(dec!(945)),
                    payment_method: Some(" UPI ".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(receipt.sale_id, "sale-1");
        assert_eq!(receipt.paid_amount, Money::new(dec!(945)));
        assert_eq!(receipt.balance_due, Money::zero());

        let after = db.sales().get("sale-1").await.unwrap().unwrap();
        assert_eq!(after.paid_amount, Money::new(dec!(945)));
        assert_eq!(after.balance_due, Money::zero());
        assert_eq!(after.payment_method, "UPI");
        assert_eq!(after.updated_at, clock.now());
        assert_eq!(after.created_at, created());

        let unchanged = shelfmark_core::Sale {
            paid_amount: before.paid_amount,
            balance_due: before.balance_due,
            payment_method: before.payment_method.clone(),
            updated_at: before.updated_at,
            ..after
        };
        assert_eq!(unchanged, before);
        assert_eq!(quantity_of(&db, "A").await, 3);
    }

    #[tokio::test]
    async fn test_overpayment_is_clamped_and_blank_method_kept() {
        let (db, clock) = seeded().await;
        let payments = db.payments(clock.clone());

        let receipt = payments
            .update_payment(
                "sale-1",
                &PaymentUpdate {
                    paid_amount: Money::new(dec!(2000)),
                    payment_method: Some("   ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.paid_amount, Money::new(dec!(945)));
        assert_eq!(receipt.balance_due, Money::zero());

        clock.advance(Duration::minutes(5));
        let receipt = payments
            .update_payment(
                "sale-1",
                &PaymentUpdate {
                    paid_amount: Money::new(dec!(-10)),
                    payment_method: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.paid_amount, Money::zero());
        assert_eq!(receipt.balance_due, Money::new(dec!(945)));

        let sale = db.sales().get("sale-1").await.unwrap().unwrap();
        assert_eq!(sale.payment_method, "Cash");
        assert_eq!(sale.total_amount, Money::new(dec!(945)));
    }

    #[tokio::test]
    async fn test_unknown_sale_is_not_found() {
        let (db, clock) = seeded().await;

        let err = db
            .payments(clock)
            .update_payment("nope", &PaymentUpdate::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Sale not found: nope");
    }
}

//! # Payment Settlement
//!
//! Credit sales are settled later: the customer pays part now, the rest on
//! a later visit. Settlement only ever touches the payment fields.
//!
//! ```text
//! Sale (total 945, paid 500, balance 445)
//!      │
//!      ▼  settle_payment(paid=945, method="UPI")
//! Sale (total 945, paid 945, balance 0, method UPI)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::billing::settle;
use crate::money::Money;
use crate::types::Sale;
use crate::validation::normalize_optional;

/// New payment state for an existing sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    /// Total paid so far (not an increment).
    #[serde(default)]
    pub paid_amount: Money,
    /// Left unchanged when blank or absent.
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// What the counter sees after a payment update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub sale_id: String,
    pub paid_amount: Money,
    pub balance_due: Money,
}

impl Sale {
    /// Applies a payment update in place.
    ///
    /// `paid_amount` is clamped to `[0, total_amount]`; the total itself is
    /// never recomputed.
    pub fn settle_payment(&mut self, update: &PaymentUpdate, now: DateTime<Utc>) -> PaymentReceipt {
        let (paid, balance) = settle(self.total_amount, update.paid_amount);
        self.paid_amount = paid;
        self.balance_due = balance;

        if let Some(method) = normalize_optional(update.payment_method.as_deref()) {
            self.payment_method = method;
        }
        self.updated_at = now;

        self.receipt()
    }

    pub fn receipt(&self) -> PaymentReceipt {
        PaymentReceipt {
            sale_id: self.id.clone(),
            paid_amount: self.paid_amount,
            balance_due: self.balance_due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Percent;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;

    fn sale() -> Sale {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        Sale {
            id: "s1".into(),
            invoice_no: "INV-20240309-140507".into(),
            created_at: at,
            updated_at: at,
            customer_name: None,
            customer_phone: None,
            gst_percent: Percent::new(dec!(5)),
            discount_percent: Percent::new(dec!(10)),
            discount_amount: Money::new(dec!(100)),
            paid_amount: Money::new(dec!(500)),
            payment_method: "Cash".into(),
            subtotal: Money::new(dec!(1000)),
            taxable_amount: Money::new(dec!(900)),
            gst_amount: Money::new(dec!(45)),
            total_amount: Money::new(dec!(945)),
            balance_due: Money::new(dec!(445)),
            items: vec![],
        }
    }

    #[test]
    fn test_settle_changes_only_payment_fields() {
        let mut sale = sale();
        let before = sale.clone();
        let later = sale.created_at + Duration::days(3);

        let receipt = sale.settle_payment(
            &PaymentUpdate {
                paid_amount: Money::new(dec!(945)),
                payment_method: Some(" UPI ".into()),
            },
            later,
        );

        assert_eq!(receipt.sale_id, "s1");
        assert_eq!(receipt.paid_amount, Money::new(dec!(945)));
        assert_eq!(receipt.balance_due, Money::zero());
        assert_eq!(sale.payment_method, "UPI");
        assert_eq!(sale.updated_at, later);

        // Frozen fields
        assert_eq!(sale.total_amount, before.total_amount);
        assert_eq!(sale.subtotal, before.subtotal);
        assert_eq!(sale.gst_amount, before.gst_amount);
        assert_eq!(sale.created_at, before.created_at);
        assert_eq!(sale.invoice_no, before.invoice_no);
    }

    #[test]
    fn test_overpayment_is_clamped() {
        let mut sale = sale();
        let receipt = sale.settle_payment(
            &PaymentUpdate {
                paid_amount: Money::new(dec!(2000)),
                payment_method: None,
            },
            sale.created_at,
        );
        assert_eq!(receipt.paid_amount, Money::new(dec!(945)));
        assert_eq!(receipt.balance_due, Money::zero());
        assert_eq!(sale.payment_method, "Cash");
    }

    #[test]
    fn test_negative_payment_and_blank_method() {
        let mut sale = sale();
        let receipt = sale.settle_payment(
            &PaymentUpdate {
                paid_amount: Money::new(dec!(-10)),
                payment_method: Some("   ".into()),
            },
            sale.created_at,
        );
        assert_eq!(receipt.paid_amount, Money::zero());
        assert_eq!(receipt.balance_due, Money::new(dec!(945)));
        assert_eq!(sale.payment_method, "Cash");
    }
}

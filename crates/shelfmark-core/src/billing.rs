//! # Billing Module
//!
//! The bill arithmetic. Every persisted sale is produced by
//! [`BillTotals::compute`], so the order below is the only order.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. line_total  = unit_price × quantity                                │
//! │  2. subtotal    = Σ line_total                                         │
//! │  3. discount    = clamp(subtotal × discount% / 100, 0, subtotal)       │
//! │                   (discount% clamped to [0, 100] first)                │
//! │  4. taxable     = max(0, subtotal − discount)                          │
//! │  5. gst         = taxable × gst% / 100   (gst% clamped to [0, 28])     │
//! │  6. total       = taxable + gst                                        │
//! │  7. paid        = clamp(paid, 0, total);  balance = total − paid       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is rounded here. Amounts past the decimal range are reported as
//! [`CoreError::AmountOutOfRange`] instead of panicking.

use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Percent};

/// Highest GST slab the counter accepts.
pub const MAX_GST_PERCENT: Percent = Percent::new(dec!(28));

/// A discount can at most make the bill free.
pub const MAX_DISCOUNT_PERCENT: Percent = Percent::new(dec!(100));

/// The full set of derived amounts for one bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillTotals {
    pub subtotal: Money,
    /// Discount rate after clamping.
    pub discount_percent: Percent,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    /// GST rate after clamping.
    pub gst_percent: Percent,
    pub gst_amount: Money,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub balance_due: Money,
}

impl BillTotals {
    /// Computes a bill from its line totals.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use shelfmark_core::billing::BillTotals;
    /// use shelfmark_core::{Money, Percent};
    ///
    /// let bill = BillTotals::compute(
    ///     [Money::new(dec!(600)), Money::new(dec!(400))],
    ///     Percent::new(dec!(10)),
    ///     Percent::new(dec!(5)),
    ///     Money::new(dec!(500)),
    /// )
    /// .unwrap();
    /// assert_eq!(bill.subtotal, Money::new(dec!(1000)));
    /// assert_eq!(bill.discount_amount, Money::new(dec!(100)));
    /// assert_eq!(bill.taxable_amount, Money::new(dec!(900)));
    /// assert_eq!(bill.gst_amount, Money::new(dec!(45)));
    /// ```
    pub fn compute(
        line_totals: impl IntoIterator<Item = Money>,
        discount_percent: Percent,
        gst_percent: Percent,
        paid_amount: Money,
    ) -> CoreResult<Self> {
        let subtotal = Money::checked_sum(line_totals).ok_or(CoreError::AmountOutOfRange)?;

        let discount_percent = discount_percent.clamp_to(MAX_DISCOUNT_PERCENT);
        let discount_amount = subtotal
            .checked_percent(discount_percent)
            .ok_or(CoreError::AmountOutOfRange)?
            .clamp_to(Money::zero(), subtotal);

        let taxable_amount = (subtotal - discount_amount).max(Money::zero());

        let gst_percent = gst_percent.clamp_to(MAX_GST_PERCENT);
        let gst_amount = taxable_amount
            .checked_percent(gst_percent)
            .ok_or(CoreError::AmountOutOfRange)?;

        let total_amount = taxable_amount
            .checked_add(gst_amount)
            .ok_or(CoreError::AmountOutOfRange)?;
        let (paid_amount, balance_due) = settle(total_amount, paid_amount);

        Ok(BillTotals {
            subtotal,
            discount_percent,
            discount_amount,
            taxable_amount,
            gst_percent,
            gst_amount,
            total_amount,
            paid_amount,
            balance_due,
        })
    }
}

/// Clamps a payment against a fixed total.
///
/// Returns `(paid, balance_due)` with `0 <= paid <= total`.
pub fn settle(total_amount: Money, paid_amount: Money) -> (Money, Money) {
    let paid = paid_amount.clamp_to(Money::zero(), total_amount);
    (paid, total_amount - paid)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn m(value: rust_decimal::Decimal) -> Money {
        Money::new(value)
    }

    fn p(value: rust_decimal::Decimal) -> Percent {
        Percent::new(value)
    }

    #[test]
    fn test_reference_bill() {
        let bill = BillTotals::compute([m(dec!(1000))], p(dec!(10)), p(dec!(5)), m(dec!(500))).unwrap();

        assert_eq!(bill.subtotal, m(dec!(1000)));
        assert_eq!(bill.discount_amount, m(dec!(100)));
        assert_eq!(bill.taxable_amount, m(dec!(900)));
        assert_eq!(bill.gst_amount, m(dec!(45)));
        assert_eq!(bill.total_amount, m(dec!(945)));
        assert_eq!(bill.paid_amount, m(dec!(500)));
        assert_eq!(bill.balance_due, m(dec!(445)));
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let lines = [m(dec!(0.1)), m(dec!(0.2)), m(dec!(599.97))];
        let bill = BillTotals::compute(lines, Percent::zero(), Percent::zero(), Money::zero()).unwrap();
        assert_eq!(bill.subtotal, m(dec!(600.27)));
        assert_eq!(bill.total_amount, bill.subtotal);
        assert_eq!(bill.balance_due, bill.subtotal);
    }

    #[test]
    fn test_rates_are_clamped() {
        let bill = BillTotals::compute([m(dec!(200))], p(dec!(150)), p(dec!(40)), Money::zero()).unwrap();
        assert_eq!(bill.discount_percent, MAX_DISCOUNT_PERCENT);
        assert_eq!(bill.discount_amount, m(dec!(200)));
        assert_eq!(bill.taxable_amount, Money::zero());
        assert_eq!(bill.gst_percent, MAX_GST_PERCENT);
        assert_eq!(bill.gst_amount, Money::zero());
        assert_eq!(bill.total_amount, Money::zero());

        let bill = BillTotals::compute([m(dec!(200))], p(dec!(-5)), p(dec!(-1)), Money::zero()).unwrap();
        assert_eq!(bill.discount_amount, Money::zero());
        assert_eq!(bill.gst_amount, Money::zero());
        assert_eq!(bill.total_amount, m(dec!(200)));
    }

    #[test]
    fn test_gst_upper_bound() {
        let bill = BillTotals::compute([m(dec!(100))], Percent::zero(), p(dec!(99)), Money::zero()).unwrap();
        assert_eq!(bill.gst_amount, m(dec!(28)));
        assert_eq!(bill.total_amount, bill.taxable_amount + bill.gst_amount);
    }

    #[test]
    fn test_fractional_rates_stay_unrounded() {
        let bill = BillTotals::compute([m(dec!(333.33))], p(dec!(12.5)), p(dec!(18)), Money::zero()).unwrap();
        assert_eq!(bill.discount_amount, m(dec!(41.66625)));
        assert_eq!(bill.taxable_amount, m(dec!(291.66375)));
        assert_eq!(bill.gst_amount, m(dec!(52.499475)));
        assert_eq!(bill.total_amount, m(dec!(344.163225)));
    }

    #[test]
    fn test_payment_clamping() {
        let bill = BillTotals::compute([m(dec!(100))], Percent::zero(), Percent::zero(), m(dec!(250))).unwrap();
        assert_eq!(bill.paid_amount, m(dec!(100)));
        assert_eq!(bill.balance_due, Money::zero());

        let bill = BillTotals::compute([m(dec!(100))], Percent::zero(), Percent::zero(), m(dec!(-20))).unwrap();
        assert_eq!(bill.paid_amount, Money::zero());
        assert_eq!(bill.balance_due, m(dec!(100)));
    }

    #[test]
    fn test_out_of_range_amounts_are_errors() {
        let huge = m(rust_decimal::Decimal::MAX);
        assert!(matches!(
            BillTotals::compute([huge, huge], Percent::zero(), Percent::zero(), Money::zero()),
            Err(CoreError::AmountOutOfRange)
        ));
        assert!(matches!(
            BillTotals::compute([huge], Percent::zero(), p(dec!(5)), Money::zero()),
            Err(CoreError::AmountOutOfRange)
        ));

        // Fully discounted, a large subtotal still computes
        let big = m(dec!(1000000000000000000000000000));
        let bill = BillTotals::compute([big], p(dec!(100)), p(dec!(28)), Money::zero()).unwrap();
        assert_eq!(bill.total_amount, Money::zero());
    }

    #[test]
    fn test_settle() {
        assert_eq!(settle(m(dec!(945)), m(dec!(945))), (m(dec!(945)), Money::zero()));
        assert_eq!(settle(Money::zero(), m(dec!(10))), (Money::zero(), Money::zero()));
    }
}

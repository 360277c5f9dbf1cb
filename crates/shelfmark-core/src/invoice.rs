//! # Invoice Numbers
//!
//! Format: `INV-YYYYMMDD-HHMMSS` from the checkout instant (UTC).
//!
//! ```text
//! 14:05:07, first sale that second   → INV-20240309-140507
//! 14:05:07, second sale that second  → INV-20240309-140507-02
//! 14:05:07, third sale that second   → INV-20240309-140507-03
//! ```
//!
//! The suffix sequence is the number of invoices already issued under the
//! same prefix, counted inside the checkout transaction. A UNIQUE index on
//! `sales.invoice_no` backs it up.

use chrono::{DateTime, Utc};

/// The per-second part shared by all invoices issued in that second.
pub fn invoice_prefix(at: DateTime<Utc>) -> String {
    at.format("INV-%Y%m%d-%H%M%S").to_string()
}

/// Builds an invoice number given how many already exist for the prefix.
pub fn invoice_number(at: DateTime<Utc>, existing: u32) -> String {
    let prefix = invoice_prefix(at);
    if existing == 0 {
        prefix
    } else {
        format!("{}-{:02}", prefix, existing + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_invoice_number_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(invoice_prefix(at), "INV-20240309-140507");
        assert_eq!(invoice_number(at, 0), "INV-20240309-140507");
        assert_eq!(invoice_number(at, 1), "INV-20240309-140507-02");
        assert_eq!(invoice_number(at, 9), "INV-20240309-140507-10");
        assert_eq!(invoice_number(at, 120), "INV-20240309-140507-121");
    }
}

//! Fixtures shared by the repository and engine tests.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shelfmark_core::{Money, Percent, Product, Sale, SaleItem};

use crate::pool::Database;

pub fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

pub fn product(code: &str, price: Decimal, quantity: i64) -> Product {
    Product {
        id: format!("id-{code}"),
        product_code: code.to_string(),
        name: format!("Item {code}"),
        price: Money::new(price),
        quantity,
        barcode_value: None,
        created_at: created(),
        updated_at: created(),
    }
}

pub async fn stock(db: &Database, code: &str, price: Decimal, quantity: i64) {
    db.products()
        .insert(&product(code, price, quantity))
        .await
        .unwrap();
}

pub async fn quantity_of(db: &Database, code: &str) -> i64 {
    db.products()
        .get_by_code(code)
        .await
        .unwrap()
        .unwrap()
        .quantity
}

/// The 1000 / 10% / 5% / paid 500 reference bill.
pub fn sale(id: &str, invoice_no: &str) -> Sale {
    let item = |n: usize, code: &str, qty: i64, price: Decimal| SaleItem {
        id: format!("{id}-item-{n}"),
        sale_id: id.to_string(),
        product_code: code.to_string(),
        name: format!("Item {code}"),
        quantity: qty,
        unit_price: Money::new(price),
        line_total: Money::new(price * Decimal::from(qty)),
    };

    Sale {
        id: id.to_string(),
        invoice_no: invoice_no.to_string(),
        created_at: created(),
        updated_at: created(),
        customer_name: Some("Asha".into()),
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
        items: vec![item(1, "A", 2, dec!(300)), item(2, "B", 1, dec!(400))],
    }
}

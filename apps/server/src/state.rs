//! # Application State
//!
//! Everything a handler needs, built once at startup and shared behind an
//! `Arc`. Nothing in here is mutable: the database pool does its own
//! locking and the renderers are pure.

use shelfmark_core::Clock;
use shelfmark_db::{CheckoutEngine, Database, PaymentUpdater};
use shelfmark_docs::{BarcodeEncoder, InvoiceRenderer, LabelSheetRenderer, QrEncoder, ShopProfile};
use std::sync::Arc;
use url::Url;

pub struct AppState {
    pub db: Database,
    pub checkout: CheckoutEngine,
    pub payments: PaymentUpdater,
    pub invoices: InvoiceRenderer,
    pub labels: LabelSheetRenderer,
    pub qr: Arc<dyn QrEncoder>,
    /// Base of the public product page links encoded in QR codes.
    pub client_base_url: Url,
}

impl AppState {
    pub fn new(
        db: Database,
        clock: Arc<dyn Clock>,
        shop: ShopProfile,
        barcode: Arc<dyn BarcodeEncoder>,
        qr: Arc<dyn QrEncoder>,
        client_base_url: Url,
    ) -> Self {
        AppState {
            checkout: db.checkout(clock.clone()),
            payments: db.payments(clock),
            invoices: InvoiceRenderer::new(shop.clone()),
            labels: LabelSheetRenderer::new(shop, barcode),
            qr,
            client_base_url,
            db,
        }
    }
}

pub type SharedState = Arc<AppState>;

//! # Invoice Renderer
//!
//! One A4 tax invoice per sale.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ Shop name                                TAX INVOICE  │
//! │ address / phone                    Invoice No: INV-…  │
//! │                                     Date: 09 Mar 2024 │
//! │───────────────────────────────────────────────────────│
//! │ ┌ BILL TO ─────────────┐  ┌ GST ─────────────────────┐ │
//! │ │ name / phone         │  │ 5% (single rate)         │ │
//! │ └──────────────────────┘  │ Payment: Cash            │ │
//! │                           └──────────────────────────┘ │
//! │ # │ Item             │ Qty │ Unit (₹) │ Amount (₹)    │  ← repeated on
//! │ 1 │ Cotton Shirt     │   2 │   300.00 │     600.00    │    every page
//! │                                  Subtotal   ₹ 1000.00 │
//! │                                  …                    │
//! │                                  Balance Due ₹ 445.00 │
//! │              Thank you for your business!             │
//! └───────────────────────────────────────────────────────┘
//! ```

use shelfmark_core::Sale;

use crate::document::{Document, DocumentKind, Page, TextRun, A4};
use crate::profile::ShopProfile;

const MARGIN: f32 = 24.0;
const CONTENT_WIDTH: f32 = A4.width - 2.0 * MARGIN;
const PAGE_BOTTOM: f32 = A4.height - MARGIN;

const HEADER_RIGHT_WIDTH: f32 = 180.0;
const LINE_GAP: f32 = 14.0;

const BOX_GAP: f32 = 16.0;
const BOX_HEIGHT: f32 = 60.0;
const BOX_PAD: f32 = 10.0;

const COLUMN_WIDTHS: [f32; 5] = [30.0, 287.0, 60.0, 80.0, 90.0];
const CELL_PAD: f32 = 6.0;
const TABLE_HEADER_HEIGHT: f32 = 22.0;
const ROW_HEIGHT: f32 = 20.0;
const MAX_ITEM_NAME_CHARS: usize = 55;

const TOTALS_WIDTH: f32 = 260.0;
const TOTALS_VALUE_WIDTH: f32 = 120.0;
const TOTALS_ROW_HEIGHT: f32 = 16.0;
/// Totals rows, the rule above Total, and the footer line.
const TOTALS_BLOCK_HEIGHT: f32 = 154.0;

/// Renders sales as tax invoices.
#[derive(Debug, Clone)]
pub struct InvoiceRenderer {
    profile: ShopProfile,
}

impl InvoiceRenderer {
    pub fn new(profile: ShopProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ShopProfile {
        &self.profile
    }

    /// Lays out the invoice. Pure: the same sale renders identically.
    pub fn render(&self, sale: &Sale) -> Document {
        let mut doc = Document::new(DocumentKind::Invoice, sale.invoice_no.clone());

        let y = self.draw_header(doc.current_page(), sale);
        let y = self.draw_parties(doc.current_page(), sale, y);
        let y = self.draw_items(&mut doc, sale, y);
        self.draw_totals(&mut doc, sale, y);

        tracing::debug!(
            invoice_no = %sale.invoice_no,
            items = sale.items.len(),
            pages = doc.page_count(),
            "Rendered invoice"
        );

        doc
    }

    // =========================================================================
    // Sections
    // =========================================================================

    fn draw_header(&self, page: &mut Page, sale: &Sale) -> f32 {
        let left_width = CONTENT_WIDTH - HEADER_RIGHT_WIDTH;

        page.text(
            TextRun::new(MARGIN, MARGIN, left_width, &self.profile.name)
                .size(16.0)
                .bold(),
        );
        let mut left_y = MARGIN + 22.0;
        for line in &self.profile.address_lines {
            page.text(TextRun::new(MARGIN, left_y, left_width, line).muted());
            left_y += LINE_GAP;
        }
        if let Some(phone) = self.profile.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            page.text(TextRun::new(MARGIN, left_y, left_width, format!("Phone: {}", phone)).muted());
            left_y += LINE_GAP;
        }

        let right_x = MARGIN + left_width;
        page.text(
            TextRun::new(right_x, MARGIN, HEADER_RIGHT_WIDTH, "TAX INVOICE")
                .size(14.0)
                .bold()
                .right(),
        );
        page.text(
            TextRun::new(
                right_x,
                MARGIN + 20.0,
                HEADER_RIGHT_WIDTH,
                format!("Invoice No: {}", sale.invoice_no),
            )
            .right(),
        );
        page.text(
            TextRun::new(
                right_x,
                MARGIN + 20.0 + LINE_GAP,
                HEADER_RIGHT_WIDTH,
                format!("Date: {}", sale.created_at.format("%d %b %Y")),
            )
            .right(),
        );
        let right_y = MARGIN + 20.0 + 2.0 * LINE_GAP;

        let rule_y = left_y.max(right_y) + 10.0;
        page.hline(MARGIN, rule_y, CONTENT_WIDTH, 1.0);
        rule_y + 10.0
    }

    fn draw_parties(&self, page: &mut Page, sale: &Sale, y: f32) -> f32 {
        let box_width = (CONTENT_WIDTH - BOX_GAP) / 2.0;

        let bill_to = [
            "BILL TO".to_string(),
            sale.customer_name.clone().unwrap_or_else(|| "-".to_string()),
            sale.customer_phone.clone().unwrap_or_else(|| "-".to_string()),
        ];
        let tax = [
            "GST".to_string(),
            format!("{}% (single rate)", sale.gst_percent),
            format!("Payment: {}", sale.payment_method),
        ];

        for (x, lines) in [(MARGIN, bill_to), (MARGIN + box_width + BOX_GAP, tax)] {
            page.rect(x, y, box_width, BOX_HEIGHT, false, 1.0);
            for (i, line) in lines.into_iter().enumerate() {
                let run = TextRun::new(
                    x + BOX_PAD,
                    y + BOX_PAD + i as f32 * LINE_GAP,
                    box_width - 2.0 * BOX_PAD,
                    line,
                );
                page.text(if i == 0 { run.bold() } else { run });
            }
        }

        y + BOX_HEIGHT + 20.0
    }

    fn draw_items(&self, doc: &mut Document, sale: &Sale, y: f32) -> f32 {
        let mut y = self.draw_table_header(doc.current_page(), y);

        for (i, item) in sale.items.iter().enumerate() {
            if y + ROW_HEIGHT > PAGE_BOTTOM {
                doc.add_page();
                y = self.draw_table_header(doc.current_page(), MARGIN);
            }

            let page = doc.current_page();
            let cells = [
                (i + 1).to_string(),
                truncate_name(&item.name),
                item.quantity.to_string(),
                item.unit_price.fixed(),
                item.line_total.fixed(),
            ];
            draw_row(page, y, cells, false);
            page.hline(MARGIN, y + ROW_HEIGHT, CONTENT_WIDTH, 0.5);
            y += ROW_HEIGHT;
        }

        y + 20.0
    }

    fn draw_table_header(&self, page: &mut Page, y: f32) -> f32 {
        let symbol = &self.profile.currency_symbol;
        page.rect(MARGIN, y, CONTENT_WIDTH, TABLE_HEADER_HEIGHT, true, 0.0);
        draw_row(
            page,
            y,
            [
                "#".to_string(),
                "Item".to_string(),
                "Qty".to_string(),
                format!("Unit ({})", symbol),
                format!("Amount ({})", symbol),
            ],
            true,
        );
        page.hline(MARGIN, y + TABLE_HEADER_HEIGHT, CONTENT_WIDTH, 1.0);
        y + TABLE_HEADER_HEIGHT
    }

    fn draw_totals(&self, doc: &mut Document, sale: &Sale, y: f32) {
        let mut y = y;
        if y + TOTALS_BLOCK_HEIGHT > PAGE_BOTTOM {
            doc.add_page();
            y = MARGIN;
        }
        let page = doc.current_page();
        let money = |m| self.profile.format_money(m);

        let discount_label = if sale.discount_percent.is_zero() {
            "Discount".to_string()
        } else {
            format!("Discount ({}%)", sale.discount_percent)
        };

        for (label, value) in [
            ("Subtotal".to_string(), money(sale.subtotal)),
            (discount_label, format!("- {}", money(sale.discount_amount))),
            ("Taxable Amount".to_string(), money(sale.taxable_amount)),
            (format!("GST ({}%)", sale.gst_percent), money(sale.gst_amount)),
        ] {
            draw_total_row(page, y, label, value, false);
            y += TOTALS_ROW_HEIGHT;
        }

        y += 6.0;
        page.hline(MARGIN + CONTENT_WIDTH - TOTALS_WIDTH, y, TOTALS_WIDTH, 1.0);
        y += 6.0;

        for (label, value, bold) in [
            ("Total", money(sale.total_amount), true),
            ("Paid", money(sale.paid_amount), false),
            ("Balance Due", money(sale.balance_due), true),
        ] {
            draw_total_row(page, y, label.to_string(), value, bold);
            y += TOTALS_ROW_HEIGHT;
        }

        y += 18.0;
        page.text(
            TextRun::new(MARGIN, y, CONTENT_WIDTH, &self.profile.footer_note)
                .center()
                .muted(),
        );
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn draw_row(page: &mut Page, y: f32, cells: [String; 5], bold: bool) {
    let mut x = MARGIN;
    for (col, (content, width)) in cells.into_iter().zip(COLUMN_WIDTHS).enumerate() {
        let mut run = TextRun::new(x + CELL_PAD, y + CELL_PAD, width - 2.0 * CELL_PAD, content);
        if col >= 2 {
            run = run.right();
        }
        if bold {
            run = run.bold();
        }
        page.text(run);
        x += width;
    }
}

fn draw_total_row(page: &mut Page, y: f32, label: String, value: String, bold: bool) {
    let x = MARGIN + CONTENT_WIDTH - TOTALS_WIDTH;
    let label_width = TOTALS_WIDTH - TOTALS_VALUE_WIDTH;

    let mut label_run = TextRun::new(x, y, label_width, label);
    let mut value_run = TextRun::new(x + label_width, y, TOTALS_VALUE_WIDTH, value).right();
    if bold {
        label_run = label_run.bold();
        value_run = value_run.bold();
    }
    page.text(label_run);
    page.text(value_run);
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_ITEM_NAME_CHARS {
        return name.to_string();
    }
    let mut short: String = name.chars().take(MAX_ITEM_NAME_CHARS - 1).collect();
    short.push('…');
    short
}

// =============================================================================
// Unit Tests
// =============================================================================

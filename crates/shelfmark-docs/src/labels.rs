//! # Label Sheet Renderer
//!
//! Barcode stickers, two per row, four rows per A4 sheet.
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │ ┌─────────────────┐   ┌─────────────────┐ │
//! │ │  Shop name      │   │  Shop name      │ │
//! │ │  ₹ 499.00       │   │  ₹ 499.00       │ │
//! │ │ ║│║║│║│║║│║│║║  │   │ ║│║║│║│║║│║│║║  │ │
//! │ │  SHIRT-01       │   │  SHIRT-01       │ │
//! │ │  website        │   │  website        │ │
//! │ └─────────────────┘   └─────────────────┘ │
//! │          … 3 more rows …                  │
//! └───────────────────────────────────────────┘
//! ```
//!
//! Each distinct payload is encoded once per sheet; stickers sharing a
//! payload reference the same embedded image.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use shelfmark_core::Product;

use crate::document::{Document, DocumentKind, TextRun, A4};
use crate::encoder::BarcodeEncoder;
use crate::error::{DocError, DocResult};
use crate::profile::ShopProfile;

/// Upper bound on stickers printed for one line.
pub const MAX_LABELS_PER_LINE: i64 = 500;

const MARGIN: f32 = 18.0;
const SPACING: f32 = 14.0;
const COLUMNS: usize = 2;
const CELL_WIDTH: f32 = (A4.width - 2.0 * MARGIN - SPACING) / COLUMNS as f32;
const CELL_HEIGHT: f32 = 180.0;
const CELL_PAD: f32 = 12.0;
const BARCODE_WIDTH: f32 = 200.0;
const BARCODE_HEIGHT: f32 = 65.0;

/// How many stickers to print for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub product_code: String,
    #[serde(default)]
    pub label_count: i64,
}

/// Renders sticker sheets with an injected barcode encoder.
#[derive(Clone)]
pub struct LabelSheetRenderer {
    profile: ShopProfile,
    barcode: Arc<dyn BarcodeEncoder>,
}

impl LabelSheetRenderer {
    pub fn new(profile: ShopProfile, barcode: Arc<dyn BarcodeEncoder>) -> Self {
        Self { profile, barcode }
    }

    /// Stickers that fit on one sheet.
    pub fn per_page() -> usize {
        let rows = ((A4.height - 2.0 * MARGIN + SPACING) / (CELL_HEIGHT + SPACING)) as usize;
        rows * COLUMNS
    }

    /// Lays out the sheet.
    ///
    /// `products` is whatever the catalog returned for the requested codes.
    /// Counts are clamped to `[0, 500]`; lines repeating a code are merged
    /// into the first one. An all-zero request yields a single blank page.
    pub fn render(&self, requests: &[LabelRequest], products: &[Product]) -> DocResult<Document> {
        let plan = plan_stickers(requests, products)?;

        let mut doc = Document::new(DocumentKind::LabelSheet, "Labels");
        doc.add_page();

        let mut images: HashMap<&str, String> = HashMap::new();
        let per_page = Self::per_page();
        let mut slot = 0usize;

        for (product, count) in &plan {
            if *count == 0 {
                continue;
            }
            let payload = product.barcode_payload();
            let image_id = match images.get(payload) {
                Some(id) => id.clone(),
                None => {
                    let id = doc.add_image(self.barcode.encode(payload)?);
                    images.insert(payload, id.clone());
                    id
                }
            };

            for _ in 0..*count {
                if slot == per_page {
                    doc.add_page();
                    slot = 0;
                }
                self.draw_sticker(&mut doc, slot, product, payload, &image_id);
                slot += 1;
            }
        }

        tracing::debug!(
            products = plan.len(),
            stickers = plan.iter().map(|(_, n)| *n).sum::<usize>(),
            images = doc.images.len(),
            pages = doc.page_count(),
            "Rendered label sheet"
        );

        Ok(doc)
    }

    fn draw_sticker(&self, doc: &mut Document, slot: usize, product: &Product, payload: &str, image: &str) {
        let col = slot % COLUMNS;
        let row = slot / COLUMNS;
        let x = MARGIN + col as f32 * (CELL_WIDTH + SPACING);
        let y = MARGIN + row as f32 * (CELL_HEIGHT + SPACING);
        let inner_x = x + CELL_PAD;
        let inner_width = CELL_WIDTH - 2.0 * CELL_PAD;

        let page = doc.current_page();
        page.rect(x, y, CELL_WIDTH, CELL_HEIGHT, false, 2.0);
        page.text(
            TextRun::new(inner_x, y + CELL_PAD, inner_width, &self.profile.name)
                .size(14.0)
                .bold()
                .center(),
        );
        page.text(
            TextRun::new(inner_x, y + 32.0, inner_width, self.profile.format_money(product.price))
                .size(13.0)
                .bold()
                .center(),
        );
        page.image(
            x + (CELL_WIDTH - BARCODE_WIDTH) / 2.0,
            y + 56.0,
            BARCODE_WIDTH,
            BARCODE_HEIGHT,
            image,
        );
        page.text(
            TextRun::new(inner_x, y + 56.0 + BARCODE_HEIGHT + 4.0, inner_width, payload)
                .size(11.0)
                .center(),
        );
        if let Some(website) = self.profile.website() {
            page.text(
                TextRun::new(inner_x, y + 144.0, inner_width, website)
                    .size(8.0)
                    .center()
                    .muted(),
            );
        }
    }
}

/// Resolves and merges label lines into `(product, stickers)` in first-seen
/// order.
fn plan_stickers<'a>(
    requests: &[LabelRequest],
    products: &'a [Product],
) -> DocResult<Vec<(&'a Product, usize)>> {
    if requests.is_empty() {
        return Err(DocError::EmptyRequest);
    }

    let by_code: HashMap<&str, &Product> = products
        .iter()
        .map(|p| (p.product_code.as_str(), p))
        .collect();

    let mut plan: Vec<(&Product, usize)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut missing: Vec<String> = Vec::new();

    for (index, request) in requests.iter().enumerate() {
        let code = request.product_code.trim();
        if code.is_empty() {
            return Err(DocError::BlankCode { index });
        }

        let Some(product) = by_code.get(code).copied() else {
            if !missing.iter().any(|m| m == code) {
                missing.push(code.to_string());
            }
            continue;
        };

        let count = request.label_count.clamp(0, MAX_LABELS_PER_LINE) as usize;
        match position.get(code).copied() {
            Some(i) => plan[i].1 += count,
            None => {
                position.insert(product.product_code.as_str(), plan.len());
                plan.push((product, count));
            }
        }
    }

    if !missing.is_empty() {
        return Err(DocError::ProductsNotFound(missing));
    }
    Ok(plan)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use crate::encoder::{Bitmap, EncodeError};
    use crate::pdf::tests::{image_draws, read_back};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use shelfmark_core::Money;
    use std::sync::Mutex;

    /// Records every payload it is asked to encode.
    #[derive(Default)]
    struct CountingEncoder {
        calls: Mutex<Vec<String>>,
    }

    impl CountingEncoder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl BarcodeEncoder for CountingEncoder {
        fn encode(&self, payload: &str) -> Result<Bitmap, EncodeError> {
            self.calls.lock().unwrap().push(payload.to_string());
            Ok(Bitmap::from_modules(&vec![1; payload.len()], 2).unwrap())
        }
    }

    struct FailingEncoder;

    impl BarcodeEncoder for FailingEncoder {
        fn encode(&self, payload: &str) -> Result<Bitmap, EncodeError> {
            Err(EncodeError {
                symbology: "Code128",
                payload: payload.to_string(),
                reason: "unsupported".into(),
            })
        }
    }

    fn product(code: &str, barcode: Option<&str>) -> Product {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product {
            id: format!("id-{}", code),
            product_code: code.to_string(),
            name: format!("Item {}", code),
            price: Money::new(dec!(499)),
            quantity: 10,
            barcode_value: barcode.map(str::to_string),
            created_at: at,
            updated_at: at,
        }
    }

    fn req(code: &str, count: i64) -> LabelRequest {
        LabelRequest {
            product_code: code.to_string(),
            label_count: count,
        }
    }

    fn renderer(encoder: Arc<dyn BarcodeEncoder>) -> LabelSheetRenderer {
        LabelSheetRenderer::new(
            ShopProfile {
                website: Some("www.website.com".into()),
                ..ShopProfile::default()
            },
            encoder,
        )
    }

    fn sticker_count(doc: &Document) -> usize {
        doc.pages
            .iter()
            .flat_map(|p| &p.elements)
            .filter(|e| matches!(e, Element::Image { .. }))
            .count()
    }

    #[test]
    fn test_grid_capacity() {
        assert_eq!(LabelSheetRenderer::per_page(), 8);
        assert_eq!(CELL_WIDTH, 272.5);
    }

    #[test]
    fn test_counts_are_clamped() {
        let encoder = Arc::new(CountingEncoder::default());
        let products = [product("A", None), product("B", None)];

        let doc = renderer(encoder.clone())
            .render(&[req("A", 0), req("B", 900)], &products)
            .unwrap();

        assert_eq!(sticker_count(&doc), 500);
        assert_eq!(doc.page_count(), 63);
        assert_eq!(encoder.calls(), vec!["B".to_string()]);
    }

    #[test]
    fn test_zero_stickers_still_yield_a_page() {
        let encoder = Arc::new(CountingEncoder::default());
        let doc = renderer(encoder)
            .render(&[req("A", -3)], &[product("A", None)])
            .unwrap();

        assert_eq!(sticker_count(&doc), 0);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].elements.is_empty());
    }

    #[test]
    fn test_encoder_called_once_per_payload() {
        let encoder = Arc::new(CountingEncoder::default());
        let products = [
            product("A", Some("8901234567890")),
            product("B", Some("8901234567890")),
            product("C", Some("  ")),
        ];

        let doc = renderer(encoder.clone())
            .render(&[req("A", 3), req("B", 2), req("C", 4), req("A", 1)], &products)
            .unwrap();

        assert_eq!(
            encoder.calls(),
            vec!["8901234567890".to_string(), "C".to_string()]
        );
        assert_eq!(doc.images.len(), 2);
        assert_eq!(sticker_count(&doc), 10);
    }

    #[test]
    fn test_same_code_is_merged_at_first_occurrence() {
        let encoder = Arc::new(CountingEncoder::default());
        let products = [product("A", None), product("B", None)];

        let doc = renderer(encoder)
            .render(&[req("A", 1), req("B", 1), req(" A ", 2)], &products)
            .unwrap();

        let payloads: Vec<&str> = doc.pages[0]
            .texts()
            .filter(|t| *t == "A" || *t == "B")
            .collect();
        assert_eq!(payloads, vec!["A", "A", "A", "B"]);
    }

    #[test]
    fn test_sticker_contents() {
        let doc = renderer(Arc::new(CountingEncoder::default()))
            .render(&[req("SHIRT-01", 1)], &[product("SHIRT-01", None)])
            .unwrap();

        let texts: Vec<&str> = doc.pages[0].texts().collect();
        assert_eq!(
            texts,
            vec!["Srinivasa Cloth Stores", "₹ 499.00", "SHIRT-01", "www.website.com"]
        );
    }

    #[test]
    fn test_validation_before_rendering() {
        let encoder = Arc::new(CountingEncoder::default());
        let r = renderer(encoder.clone());

        assert!(matches!(r.render(&[], &[]), Err(DocError::EmptyRequest)));
        assert!(matches!(
            r.render(&[req("A", 1), req(" ", 1)], &[product("A", None)]),
            Err(DocError::BlankCode { index: 1 })
        ));

        match r.render(&[req("X", 1), req("A", 1), req("Y", 1), req("X", 1)], &[product("A", None)]) {
            Err(DocError::ProductsNotFound(missing)) => {
                assert_eq!(missing, vec!["X".to_string(), "Y".to_string()]);
            }
            other => panic!("expected ProductsNotFound, got {:?}", other.map(|d| d.page_count())),
        }
        assert!(encoder.calls().is_empty());
    }

    #[test]
    fn test_encoder_failure_is_reported() {
        let err = renderer(Arc::new(FailingEncoder))
            .render(&[req("A", 1)], &[product("A", None)])
            .unwrap_err();
        assert_eq!(err.kind(), shelfmark_core::ErrorKind::Internal);
    }

    #[test]
    fn test_render_is_deterministic() {
        let r = renderer(Arc::new(CountingEncoder::default()));
        let products = [product("A", None), product("B", Some("8901"))];
        let requests = [req("A", 5), req("B", 7)];

        let a = r.render(&requests, &products).unwrap().to_bytes().unwrap();
        let b = r.render(&requests, &products).unwrap().to_bytes().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sheet_prints_as_pdf() {
        let products = [product("A", Some("8901")), product("B", Some("8901"))];
        let doc = renderer(Arc::new(CountingEncoder::default()))
            .render(&[req("A", 6), req("B", 4)], &products)
            .unwrap();

        let bytes = doc.to_bytes().unwrap();
        let (pages, texts) = read_back(&bytes);

        assert_eq!(pages, 2);
        assert_eq!(image_draws(&bytes), 10);
        assert_eq!(texts.iter().filter(|t| *t == "Rs. 499.00").count(), 10);
        assert_eq!(texts.iter().filter(|t| *t == "8901").count(), 10);
    }
}

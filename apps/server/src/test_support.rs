//! In-process harness for router tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use shelfmark_core::{new_id, FixedClock, Money, Product};
use shelfmark_db::{Database, DbConfig};
use lopdf::content::Content;
use lopdf::Object;
use shelfmark_docs::{BarcodeEncoder, Bitmap, EncodeError, EncodedImage, QrEncoder, ShopProfile};
use std::sync::Arc;
use tower::ServiceExt;
use url::Url;

use crate::state::AppState;

/// Echoes the payload so tests can see what was encoded.
struct EchoEncoder;

impl BarcodeEncoder for EchoEncoder {
    fn encode(&self, payload: &str) -> Result<Bitmap, EncodeError> {
        Ok(Bitmap::from_modules(payload.as_bytes(), 0).unwrap())
    }
}

impl QrEncoder for EchoEncoder {
    fn encode(&self, payload: &str) -> Result<EncodedImage, EncodeError> {
        Ok(EncodedImage::new("image/svg+xml", format!("<svg>{payload}</svg>").into_bytes()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// What a served PDF contains, read back with lopdf.
pub struct PdfSummary {
    pub pages: usize,
    /// Every shown string, page order.
    pub texts: Vec<String>,
    /// Image draws across all pages.
    pub image_draws: usize,
    /// Image XObjects in the file.
    pub images: usize,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn pdf(&self) -> PdfSummary {
        let mut pdf = lopdf::Document::load_mem(&self.body).unwrap();
        pdf.decompress();

        let mut texts: Vec<String> = Vec::new();
        let mut image_draws = 0;
        for page_id in pdf.get_pages().values() {
            let content = Content::decode(&pdf.get_page_content(*page_id).unwrap()).unwrap();
            for operation in content.operations {
                match operation.operator.as_str() {
                    "Tj" => {
                        if let Some(Object::String(bytes, _)) = operation.operands.first() {
                            texts.push(bytes.iter().map(|&b| b as char).collect());
                        }
                    }
                    "Do" => image_draws += 1,
                    _ => {}
                }
            }
        }

        let images = pdf
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| matches!(s.dict.get(b"Subtype"), Ok(Object::Name(n)) if n == b"Image"))
            .count();

        PdfSummary {
            pages: pdf.get_pages().len(),
            texts,
            image_draws,
            images,
        }
    }
}

/// Reads a decimal amount serialized as a JSON string.
pub fn amount(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
        ));
        let state = AppState::new(
            db.clone(),
            clock,
            ShopProfile::default(),
            Arc::new(EchoEncoder),
            Arc::new(EchoEncoder),
            Url::parse("http://localhost:5173").unwrap(),
        );

        TestApp {
            router: crate::app(Arc::new(state)),
            db,
        }
    }

    pub async fn stock(&self, code: &str, name: &str, price: Decimal, quantity: i64) {
        let now = Utc::now();
        self.db
            .products()
            .insert(&Product {
                id: new_id(),
                product_code: code.to_string(),
                name: name.to_string(),
                price: Money::new(price),
                quantity,
                barcode_value: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        TestResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap()
                .to_vec(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }
}

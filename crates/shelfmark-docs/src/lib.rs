//! # shelfmark-docs: Printable Documents
//!
//! Renders the two pieces of paper the shop hands out: the tax invoice and
//! the barcode sticker sheet.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Sale ───────────────► InvoiceRenderer ──────┐                         │
//! │                              ▲                │                         │
//! │                         ShopProfile           ▼                         │
//! │                              ▼            Document ──► to_bytes()       │
//! │   [LabelRequest] ─┐                           ▲        (PDF, lopdf)     │
//! │                   ├──► LabelSheetRenderer ────┘                         │
//! │   [Product] ──────┘          ▲                                          │
//! │                              │                                          │
//! │                        BarcodeEncoder (injected)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Document`] is a list of pages of absolutely positioned elements in
//! PDF points on an A4 sheet, written out as PDF. Rendering is a pure
//! function of its input: the same sale always yields the same bytes.

pub mod document;
pub mod encoder;
pub mod error;
pub mod invoice;
pub mod labels;
mod pdf;
pub mod profile;

pub use document::{Document, DocumentKind, Element, Page, DOCUMENT_CONTENT_TYPE};
pub use encoder::{
    product_public_url, Bitmap, BarcodeEncoder, EncodeError, EncodedImage, QrEncoder,
};
pub use error::{DocError, DocResult};
pub use invoice::InvoiceRenderer;
pub use labels::{LabelRequest, LabelSheetRenderer};
pub use profile::ShopProfile;

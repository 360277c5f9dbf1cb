//! Rendering errors.

use shelfmark_core::ErrorKind;
use thiserror::Error;

use crate::encoder::EncodeError;

#[derive(Debug, Error)]
pub enum DocError {
    /// A label sheet was requested with no lines at all.
    #[error("No label items requested")]
    EmptyRequest,

    /// A label line has a blank product code.
    #[error("items[{index}].productCode is required")]
    BlankCode { index: usize },

    /// Label lines name codes the catalog doesn't have.
    #[error("Some product codes were not found: {}", .0.join(", "))]
    ProductsNotFound(Vec<String>),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("PDF output failed: {0}")]
    Pdf(String),
}

impl DocError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DocError::EmptyRequest | DocError::BlankCode { .. } => ErrorKind::Validation,
            DocError::ProductsNotFound(_) => ErrorKind::NotFound,
            DocError::Encode(_) | DocError::Pdf(_) => ErrorKind::Internal,
        }
    }
}

pub type DocResult<T> = Result<T, DocError>;

//! # Image Encoders
//!
//! Barcode and QR symbols are opaque here: text goes in, an image comes out.
//! The server plugs in concrete encoders; tests plug in counting fakes.
//!
//! Barcodes come back as a [`Bitmap`] so they can be embedded in printed
//! documents. QR codes are served on their own, in whatever format the
//! encoder picks.

use thiserror::Error;
use url::Url;

/// An encoded image served as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// e.g. `image/svg+xml`, `image/png`
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

/// 8-bit grayscale raster, row-major from the top-left, `0` is black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// `None` unless `pixels` holds exactly `width * height` samples.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        (width > 0 && height > 0 && pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// One-pixel-high strip from barcode modules (`1` = bar), padded with
    /// `quiet` light modules on each side.
    pub fn from_modules(modules: &[u8], quiet: usize) -> Option<Self> {
        let light = std::iter::repeat(u8::MAX).take(quiet);
        let pixels: Vec<u8> = light
            .clone()
            .chain(modules.iter().map(|&m| if m == 0 { u8::MAX } else { 0 }))
            .chain(light)
            .collect();
        Self::new(u32::try_from(pixels.len()).ok()?, 1, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// The payload could not be turned into a symbol.
#[derive(Debug, Error)]
#[error("cannot encode {payload:?} as {symbology}: {reason}")]
pub struct EncodeError {
    pub symbology: &'static str,
    pub payload: String,
    pub reason: String,
}

/// Linear barcode for sticker sheets.
pub trait BarcodeEncoder: Send + Sync {
    fn encode(&self, payload: &str) -> Result<Bitmap, EncodeError>;
}

/// QR symbol for the public product page link.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, payload: &str) -> Result<EncodedImage, EncodeError>;
}

/// Public product page URL, `{base}/p/{code}` with the code as one
/// percent-encoded path segment.
///
/// Returns `None` for bases that cannot carry a path (`mailto:` and the like).
///
/// ## Example
/// ```rust
/// use shelfmark_docs::product_public_url;
/// use url::Url;
///
/// let base = Url::parse("http://localhost:5173/").unwrap();
/// assert_eq!(
///     product_public_url(&base, "SHIRT 01/A").unwrap().as_str(),
///     "http://localhost:5173/p/SHIRT%2001%2FA"
/// );
/// ```
pub fn product_public_url(base: &Url, product_code: &str) -> Option<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .extend(["p", product_code.trim()]);
    Some(url)
}

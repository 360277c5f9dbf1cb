//! Symbol encoders plugged into the document renderers.

use barcoders::sym::code128::Code128;
use qrcode::render::svg;
use qrcode::QrCode;
use shelfmark_docs::{BarcodeEncoder, Bitmap, EncodeError, EncodedImage, QrEncoder};

const SVG_MIME: &str = "image/svg+xml";

/// Code 128 barcode, character set B (printable ASCII), as a strip of
/// module-wide pixels the page stretches to size.
#[derive(Debug, Clone, Copy)]
pub struct Code128Bars {
    /// Light modules on each side.
    pub quiet_zone: usize,
}

impl Default for Code128Bars {
    fn default() -> Self {
        Self { quiet_zone: 10 }
    }
}

impl BarcodeEncoder for Code128Bars {
    fn encode(&self, payload: &str) -> Result<Bitmap, EncodeError> {
        let error = |reason: String| EncodeError {
            symbology: "code128",
            payload: payload.to_string(),
            reason,
        };

        // 'Ɓ' selects character set B
        let barcode = Code128::new(format!("Ɓ{payload}")).map_err(|e| error(e.to_string()))?;
        Bitmap::from_modules(&barcode.encode(), self.quiet_zone)
            .ok_or_else(|| error("empty symbol".to_string()))
    }
}

/// QR code with a quiet zone, at least `min_size` units square.
#[derive(Debug, Clone, Copy)]
pub struct QrSvg {
    pub min_size: u32,
}

impl Default for QrSvg {
    fn default() -> Self {
        Self { min_size: 240 }
    }
}

impl QrEncoder for QrSvg {
    fn encode(&self, payload: &str) -> Result<EncodedImage, EncodeError> {
        let code = QrCode::new(payload.as_bytes()).map_err(|e| EncodeError {
            symbology: "qr",
            payload: payload.to_string(),
            reason: e.to_string(),
        })?;

        let image = code
            .render::<svg::Color<'_>>()
            .min_dimensions(self.min_size, self.min_size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(EncodedImage::new(SVG_MIME, image.into_bytes()))
    }
}

use std::fmt::{self, Display};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, Luma};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

pub const MIN_QR_DIMENSION: u32 = 300;
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Rendered request, as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImagePayload(String);

impl ImagePayload {
    pub fn new(data_uri: impl Into<String>) -> Self {
        Self(data_uri.into())
    }

    pub fn from_png(png_bytes: &[u8]) -> Self {
        Self(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(png_bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the PNG body; `None` if the payload is not a base64 PNG data URI.
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        let body = self.0.strip_prefix(PNG_DATA_URI_PREFIX)?;
        STANDARD.decode(body).ok()
    }
}

impl Display for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns a request string into a scannable image.
#[async_trait]
pub trait QrRenderer {
    async fn render(&self, data: &str) -> Result<ImagePayload, RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngQrRenderer {
    size: u32,
}

impl PngQrRenderer {
    pub fn new(size: u32) -> Self {
        Self {
            size: size.max(MIN_QR_DIMENSION),
        }
    }

    pub const fn size(&self) -> u32 {
        self.size
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new(MIN_QR_DIMENSION)
    }
}

#[async_trait]
impl QrRenderer for PngQrRenderer {
    async fn render(&self, data: &str) -> Result<ImagePayload, RenderError> {
        let png_bytes = generate_qr_png(data, self.size)?;
        tracing::trace!(png_bytes = png_bytes.len(), size = self.size, "rendered QR code");
        Ok(ImagePayload::from_png(&png_bytes))
    }
}

pub fn generate_qr_png(data: &str, size: u32) -> Result<Vec<u8>, RenderError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|err| RenderError::QrEncode(err.to_string()))?;

    let dimension = size.max(MIN_QR_DIMENSION);
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(dimension, dimension)
        .dark_color(Luma([0u8]))
        .light_color(Luma([255u8]))
        .quiet_zone(true)
        .build();

    let (width, height) = image.dimensions();
    let raw = image.into_raw();
    let mut png_bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png_bytes, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(&raw, width, height, image::ColorType::L8.into())
        .map_err(|err| RenderError::PngEncode(err.to_string()))?;

    Ok(png_bytes)
}

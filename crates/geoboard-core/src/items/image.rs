//! Encoded raster payload carried by image widgets.

use crate::error::{BoardError, BoardResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Image format for stored image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// An encoded image with its pixel dimensions.
///
/// Bytes are kept as base64 text so the item serializes as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    pub data_base64: String,
}

impl ImageData {
    /// Validate encoded bytes and probe their dimensions.
    pub fn from_bytes(data: &[u8]) -> BoardResult<Self> {
        let format = ImageFormat::from_magic_bytes(data)
            .ok_or_else(|| BoardError::UnsupportedImage("unrecognized image signature".to_string()))?;

        let (width, height) = ::image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| BoardError::UnsupportedImage(e.to_string()))?
            .into_dimensions()
            .map_err(|e| BoardError::UnsupportedImage(e.to_string()))?;

        if width == 0 || height == 0 {
            return Err(BoardError::UnsupportedImage("image has no pixels".to_string()));
        }

        Ok(Self {
            format,
            width,
            height,
            data_base64: STANDARD.encode(data),
        })
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.data_base64).ok()
    }

    /// Scale that fits the image inside `max_width × max_height`, never enlarging.
    pub fn fit_scale(&self, max_width: f64, max_height: f64) -> f64 {
        let sx = max_width / self.width as f64;
        let sy = max_height / self.height as f64;
        sx.min(sy).min(1.0)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Encode a blank RGBA PNG of the given size.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ::image::RgbaImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ::image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ImageFormat::from_magic_bytes(&[0x89, 0x50, 0x4E, 0x47, 0x0D]), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic_bytes(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_magic_bytes(b"GIF89a"), None);
        assert_eq!(ImageFormat::from_magic_bytes(&[0x89]), None);
    }

    #[test]
    fn test_from_png_bytes() {
        let bytes = png_bytes(8, 4);
        let image = ImageData::from_bytes(&bytes).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!((image.width, image.height), (8, 4));
        assert_eq!(image.data().unwrap(), bytes);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = ImageData::from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, BoardError::UnsupportedImage(_)));
    }

    #[test]
    fn test_rejects_truncated_png() {
        let bytes = png_bytes(8, 4);
        assert!(ImageData::from_bytes(&bytes[..10]).is_err());
    }

    #[test]
    fn test_fit_scale() {
        let image = ImageData::from_bytes(&png_bytes(1200, 400)).unwrap();
        assert!((image.fit_scale(600.0, 400.0) - 0.5).abs() < 1e-9);
        let small = ImageData::from_bytes(&png_bytes(10, 10)).unwrap();
        assert_eq!(small.fit_scale(600.0, 400.0), 1.0);
    }
}

//! PNG encoding.

use super::{EncodeError, ImageEncoder};
use crate::engine::RawImage;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

/// Encodes frames as PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageEncoder for PngEncoder {
    fn encode(&self, image: &RawImage) -> Result<Vec<u8>, EncodeError> {
        let expected = image.expected_len();
        let buffer_error = || EncodeError::BufferSize {
            width: image.width,
            height: image.height,
            expected,
            actual: image.data.len(),
        };
        if image.data.len() != expected {
            return Err(buffer_error());
        }

        let rgba = RgbaImage::from_raw(image.width, image.height, image.data.clone())
            .ok_or_else(buffer_error)?;

        let mut cursor = Cursor::new(Vec::new());
        rgba.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }

    fn extension(&self) -> &str {
        "png"
    }

    fn name(&self) -> &str {
        "PNG"
    }
}

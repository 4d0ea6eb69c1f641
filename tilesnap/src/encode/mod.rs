//! Image encoding for rendered frames.
//!
//! The [`ImageEncoder`] trait turns a raw RGBA [`RawImage`] into the bytes of
//! a compressed image file. [`PngEncoder`] is the default implementation.
//!
//! # Example
//!
//! ```
//! use tilesnap::encode::{ImageEncoder, PngEncoder};
//! use tilesnap::engine::RawImage;
//! use std::sync::Arc;
//!
//! let encoder: Arc<dyn ImageEncoder> = Arc::new(PngEncoder::new());
//! let png = encoder.encode(&RawImage::solid(2, 2, [255, 0, 0, 255])).unwrap();
//! assert_eq!(encoder.extension(), "png");
//! assert!(png.starts_with(b"\x89PNG"));
//! ```

mod png;

pub use png::PngEncoder;

use crate::engine::RawImage;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while encoding a frame.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The pixel buffer does not match the image dimensions.
    #[error("Pixel buffer of {actual} bytes does not fit a {width}x{height} RGBA image ({expected} bytes)")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The underlying codec failed.
    #[error("Image encoding failed: {0}")]
    Codec(#[from] image::ImageError),
}

/// Trait for image encoding strategies.
///
/// Implementations must be `Send + Sync`; encoding runs on Tokio's blocking
/// pool.
pub trait ImageEncoder: Send + Sync {
    /// Encode an RGBA frame into a complete image file.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::BufferSize`] if `image.data` is not exactly
    /// `width * height * 4` bytes.
    fn encode(&self, image: &RawImage) -> Result<Vec<u8>, EncodeError>;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// Human-readable encoder name.
    fn name(&self) -> &str;
}

/// Blanket implementation for Arc-wrapped encoders.
impl<T: ImageEncoder + ?Sized> ImageEncoder for Arc<T> {
    fn encode(&self, image: &RawImage) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image)
    }

    fn extension(&self) -> &str {
        (**self).extension()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Rendering engine boundary.
//!
//! The engine itself is external. This module fixes the shape tilesnap
//! drives it through: a [`Style`] document, [`RenderParams`] for one frame,
//! and a [`ResourceHandler`] the engine calls back into for sources and
//! tiles. A render pass yields an RGBA [`RawImage`].

use crate::dispatch::{DispatchError, ResourceHandler};
use crate::tile::{ResourceRequest, TileResult};
use crate::viewport::LngLat;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::dispatch::ResourceCallback;

/// A map style document.
///
/// Opaque to tilesnap apart from the requirement that it is a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Style(serde_json::Value);

impl Style {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Parse a style from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    /// True when the style is a JSON object. `null` and other values count
    /// as no style.
    pub fn is_present(&self) -> bool {
        self.0.is_object()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Style {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Parameters of a single render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub zoom: f64,
    pub center: LngLat,
    pub width: u32,
    pub height: u32,
}

/// Raw RGBA pixel buffer produced by a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    /// Row-major pixels, [`RawImage::CHANNELS`] bytes each
    pub data: Vec<u8>,
}

impl RawImage {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 4;

    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// A buffer filled with one RGBA colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(pixels * Self::CHANNELS).collect();
        Self::new(width, height, data)
    }

    /// Length `data` must have for these dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * Self::CHANNELS
    }
}

/// Cause attached to an [`EngineError`].
pub type EngineCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failed render pass, as reported by the engine.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
    #[source]
    pub source: Option<EngineCause>,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<EngineCause>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// A map rendering engine.
pub trait RenderEngine: Send + Sync {
    /// Render one frame of `style`.
    ///
    /// The engine requests sources and tiles through `handler` as it
    /// composites. On success the image is `params.width` × `params.height`.
    fn render(
        &self,
        style: &Style,
        params: RenderParams,
        handler: Arc<dyn ResourceHandler>,
    ) -> impl Future<Output = Result<RawImage, EngineError>> + Send;
}

/// Request a resource and await its callback.
///
/// Returns `None` when the handler leaves the request unanswered.
pub async fn fetch_resource(
    handler: &dyn ResourceHandler,
    request: ResourceRequest,
) -> Option<Result<TileResult, DispatchError>> {
    let (tx, rx) = oneshot::channel();
    handler.handle(
        request,
        Box::new(move |result| {
            let _ = tx.send(result);
        }),
    );
    rx.await.ok()
}

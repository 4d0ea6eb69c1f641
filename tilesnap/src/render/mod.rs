//! Render orchestration.
//!
//! [`Renderer::render`] turns a style, an output size and [`RenderOptions`]
//! into encoded image bytes:
//!
//! 1. Validate the style, size, center, zoom and bounds. Nothing reaches the
//!    engine if any of them is invalid.
//! 2. Resolve the viewport, fitting it to the bounds when center or zoom is
//!    missing.
//! 3. Build a fresh [`RequestDispatcher`] for the archive directory and run
//!    one engine render pass with it as the resource handler.
//! 4. Encode the RGBA frame on the blocking pool.
//!
//! # Example
//!
//! ```ignore
//! use tilesnap::config::RendererConfig;
//! use tilesnap::engine::Style;
//! use tilesnap::render::{RenderOptions, Renderer};
//!
//! let renderer = Renderer::new(engine, RendererConfig::new().with_archive_dir("/srv/tiles"))?;
//! let png = renderer
//!     .render(&style, Some(512), Some(512), &RenderOptions::new().with_bounds([-10.0, -10.0, 10.0, 10.0]))
//!     .await?;
//! ```

mod error;
mod options;

pub use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use error::{RenderError, ValidationError};
pub use options::{validate_dimensions, RenderOptions, LAT_RANGE, LNG_RANGE, ZOOM_RANGE};

use crate::config::RendererConfig;
use crate::dispatch::{RequestDispatcher, ResourceHandler};
use crate::encode::{ImageEncoder, PngEncoder};
use crate::engine::{RenderEngine, RenderParams, Style};
use crate::remote::{AsyncHttpClient, AsyncReqwestClient};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Renders static map images through a [`RenderEngine`].
///
/// Holds no per-render state; concurrent `render` calls are independent.
pub struct Renderer<E, C = AsyncReqwestClient> {
    engine: E,
    encoder: Arc<dyn ImageEncoder>,
    client: Arc<C>,
    config: RendererConfig,
}

impl<E: RenderEngine> Renderer<E> {
    /// Create a renderer that fetches remote tiles with reqwest and encodes
    /// PNG.
    pub fn new(engine: E, config: RendererConfig) -> Result<Self, RenderError> {
        let client =
            AsyncReqwestClient::with_config(config.http_timeout_secs(), config.user_agent())?;
        Ok(Self::with_client(engine, config, Arc::new(client)))
    }
}

impl<E: RenderEngine, C: AsyncHttpClient> Renderer<E, C> {
    /// Create a renderer with a specific HTTP client.
    pub fn with_client(engine: E, config: RendererConfig, client: Arc<C>) -> Self {
        Self {
            engine,
            encoder: Arc::new(PngEncoder::new()),
            client,
            config,
        }
    }

    /// Replace the image encoder.
    pub fn with_encoder(mut self, encoder: Arc<dyn ImageEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn encoder(&self) -> &dyn ImageEncoder {
        self.encoder.as_ref()
    }

    /// Render `style` to an encoded image.
    ///
    /// `width` and `height` default to the configured size (1024x1024 unless
    /// changed).
    ///
    /// # Errors
    ///
    /// - [`RenderError::Validation`] for invalid input, before the engine runs
    /// - [`RenderError::Engine`] if the render pass fails
    /// - [`RenderError::Encode`] if the frame cannot be encoded
    pub async fn render(
        &self,
        style: &Style,
        width: Option<u32>,
        height: Option<u32>,
        options: &RenderOptions,
    ) -> Result<Vec<u8>, RenderError> {
        let width = width.unwrap_or(self.config.default_width());
        let height = height.unwrap_or(self.config.default_height());

        if !style.is_present() {
            return Err(ValidationError::MissingStyle.into());
        }
        validate_dimensions(width, height)?;
        let viewport = options.resolve_viewport(width, height)?;

        let archive_dir = options
            .archive_path()
            .or(self.config.archive_dir())
            .map(Path::to_path_buf);
        let handler: Arc<dyn ResourceHandler> = Arc::new(RequestDispatcher::new(
            archive_dir,
            Arc::clone(&self.client),
        ));

        info!(
            width = width,
            height = height,
            zoom = viewport.zoom,
            lng = viewport.center.lng,
            lat = viewport.center.lat,
            "Rendering map"
        );

        let params = RenderParams {
            zoom: viewport.zoom,
            center: viewport.center,
            width,
            height,
        };
        let image = self.engine.render(style, params, handler).await?;

        if image.width != width || image.height != height {
            return Err(RenderError::ImageSize {
                width,
                height,
                actual_width: image.width,
                actual_height: image.height,
            });
        }

        let encoder = Arc::clone(&self.encoder);
        let encoded = tokio::task::spawn_blocking(move || encoder.encode(&image))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))??;

        debug!(
            bytes = encoded.len(),
            encoder = self.encoder.name(),
            "Rendered map encoded"
        );
        Ok(encoded)
    }
}

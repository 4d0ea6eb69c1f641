//! Validation and render errors.

use crate::encode::EncodeError;
use crate::engine::EngineError;
use crate::remote::RemoteError;
use thiserror::Error;

/// Invalid render parameters. Always raised before the engine is invoked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("style is required")]
    MissingStyle,

    #[error("width and height must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("center must be [lng, lat] (got {0} values)")]
    CenterShape(usize),

    #[error("center longitude must be between -180 and 180 (got {0})")]
    InvalidLongitude(f64),

    #[error("center latitude must be between -90 and 90 (got {0})")]
    InvalidLatitude(f64),

    #[error("zoom must be between 0 and 22 (got {0})")]
    InvalidZoom(f64),

    #[error("bounds must be [west, south, east, north] (got {0} values)")]
    BoundsShape(usize),

    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    /// West edge east of the east edge. Boxes crossing the antimeridian are
    /// not supported.
    #[error("bounds cross the antimeridian (west {west} > east {east})")]
    AntimeridianBounds { west: f64, east: f64 },

    #[error("either center and zoom, or bounds, must be provided")]
    MissingViewport,
}

/// Errors returned by [`Renderer::render`](super::Renderer::render).
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid render request: {0}")]
    Validation(#[from] ValidationError),

    /// The render pass failed. Propagated unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Engine returned a {actual_width}x{actual_height} image for a {width}x{height} render")]
    ImageSize {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Failed to encode rendered image: {0}")]
    Encode(#[from] EncodeError),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] RemoteError),

    #[error("Encoding task failed: {0}")]
    Task(String),
}

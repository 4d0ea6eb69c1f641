//! tilesnap - Static map rendering with local and remote tile sources
//!
//! This library renders a map style to an encoded image. The rendering
//! engine itself is pluggable; tilesnap validates the request, resolves the
//! viewport, and answers the engine's resource requests from either local
//! MBTiles archives (`mbtiles://` URLs) or remote tile servers.
//!
//! # High-Level API
//!
//! For most use cases, the [`render`] module provides the entry point:
//!
//! ```ignore
//! use tilesnap::config::RendererConfig;
//! use tilesnap::engine::Style;
//! use tilesnap::render::{RenderOptions, Renderer};
//!
//! let config = RendererConfig::new().with_archive_dir("/srv/tiles");
//! let renderer = Renderer::new(engine, config)?;
//!
//! let options = RenderOptions::new().with_bounds([-10.0, -10.0, 10.0, 10.0]);
//! let png = renderer.render(&style, Some(512), Some(512), &options).await?;
//! ```

pub mod archive;
pub mod config;
pub mod coord;
pub mod dispatch;
pub mod encode;
pub mod engine;
pub mod logging;
pub mod remote;
pub mod render;
pub mod tile;
pub mod viewport;

pub use dispatch::{RequestDispatcher, ResourceHandler};
pub use engine::{RawImage, RenderEngine, Style};
pub use render::{RenderError, RenderOptions, Renderer, ValidationError};

/// Version of the tilesnap library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

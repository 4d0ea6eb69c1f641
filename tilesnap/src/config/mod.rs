//! Configuration for tilesnap.
//!
//! [`RendererConfig`] is what a [`Renderer`](crate::render::Renderer) is built
//! from. [`ConfigFile`] loads the same settings, plus logging, from
//! `~/.tilesnap/config.ini`.
//!
//! # Example
//!
//! ```no_run
//! use tilesnap::config::ConfigFile;
//!
//! let file = ConfigFile::load()?;
//! let config = file.renderer_config();
//! # Ok::<(), tilesnap::config::ConfigFileError>(())
//! ```

mod defaults;
mod file;
mod parser;
mod renderer;
mod settings;
mod writer;

pub use defaults::{
    default_log_dir, DEFAULT_HEIGHT, DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, DEFAULT_WIDTH,
    LOG_LEVELS,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use renderer::RendererConfig;
pub use settings::{ArchiveSettings, ConfigFile, HttpSettings, LoggingSettings, RenderSettings};

//! Renderer configuration.

use super::defaults::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::remote::DEFAULT_USER_AGENT;
use std::path::{Path, PathBuf};

/// Configuration for a [`Renderer`](crate::render::Renderer).
///
/// # Example
///
/// ```
/// use tilesnap::config::RendererConfig;
///
/// // Using defaults
/// let config = RendererConfig::default();
/// assert_eq!(config.default_width(), 1024);
/// assert_eq!(config.http_timeout_secs(), None);
/// assert!(config.archive_dir().is_none());
///
/// // Custom configuration
/// let config = RendererConfig::new()
///     .with_archive_dir("/srv/tiles")
///     .with_http_timeout_secs(10)
///     .with_default_size(512, 512);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Directory holding local tile archives
    archive_dir: Option<PathBuf>,
    /// Timeout for each remote tile request (in seconds), if any
    http_timeout_secs: Option<u64>,
    /// User-Agent sent with remote tile requests
    user_agent: String,
    /// Width used when a render call passes none
    default_width: u32,
    /// Height used when a render call passes none
    default_height: u32,
}

impl RendererConfig {
    /// Create a new renderer configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local archive directory.
    ///
    /// `mbtiles://<service>/...` URLs resolve to `<dir>/<service>.mbtiles`.
    /// Default: none, so local archive requests fail.
    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    /// Set a per-request timeout for remote tiles, in seconds.
    /// Default: none, so fetches run until they complete or fail.
    pub fn with_http_timeout_secs(mut self, timeout: u64) -> Self {
        self.http_timeout_secs = Some(timeout);
        self
    }

    /// Set the User-Agent header for remote requests.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the output size used when a render call passes none.
    /// Default: 1024x1024.
    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    pub fn archive_dir(&self) -> Option<&Path> {
        self.archive_dir.as_deref()
    }

    pub fn http_timeout_secs(&self) -> Option<u64> {
        self.http_timeout_secs
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn default_width(&self) -> u32 {
        self.default_width
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            archive_dir: None,
            http_timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RendererConfig::default();
        assert!(config.archive_dir().is_none());
        assert_eq!(config.http_timeout_secs(), None);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.default_width(), DEFAULT_WIDTH);
        assert_eq!(config.default_height(), DEFAULT_HEIGHT);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(RendererConfig::new(), RendererConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = RendererConfig::new()
            .with_archive_dir("/srv/tiles")
            .with_http_timeout_secs(60)
            .with_user_agent("custom/1.0")
            .with_default_size(640, 480);

        assert_eq!(config.archive_dir(), Some(Path::new("/srv/tiles")));
        assert_eq!(config.http_timeout_secs(), Some(60));
        assert_eq!(config.user_agent(), "custom/1.0");
        assert_eq!(config.default_width(), 640);
        assert_eq!(config.default_height(), 480);
    }
}

//! Default values for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::remote::DEFAULT_USER_AGENT;

/// Default output width in pixels.
pub const DEFAULT_WIDTH: u32 = 1024;

/// Default output height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1024;

/// Default log level when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "tilesnap.log";

/// Accepted values for `[logging] level`.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Default log directory (~/.tilesnap/logs).
pub fn default_log_dir() -> PathBuf {
    super::file::config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            render: RenderSettings {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
            },
            archive: ArchiveSettings { directory: None },
            http: HttpSettings {
                timeout: None,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            logging: LoggingSettings {
                directory: default_log_dir(),
                file: DEFAULT_LOG_FILE.to_string(),
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

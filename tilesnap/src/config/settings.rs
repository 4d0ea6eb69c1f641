//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub render: RenderSettings,
    pub archive: ArchiveSettings,
    pub http: HttpSettings,
    pub logging: LoggingSettings,
}

/// Default output dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
}

/// Local archive configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveSettings {
    /// Directory holding `<service>.mbtiles` files
    pub directory: Option<PathBuf>,
}

/// Remote tile fetch configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    /// Request timeout in seconds; `None` lets requests run to completion
    pub timeout: Option<u64>,
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory the log file is written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
    /// Default filter level, overridden by `RUST_LOG`
    pub level: String,
}

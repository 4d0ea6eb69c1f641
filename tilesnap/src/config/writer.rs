//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let archive_dir = config
        .archive
        .directory
        .as_deref()
        .map(path_to_string)
        .unwrap_or_default();

    format!(
        r#"[render]
; Output size used when a render call does not pass one
width = {}
height = {}

[archive]
; Directory holding <service>.mbtiles files for mbtiles:// sources
directory = {}

[http]
; Timeout for remote tile requests, in seconds (empty for none)
timeout = {}
user_agent = {}

[logging]
directory = {}
file = {}
; trace, debug, info, warn or error (RUST_LOG takes precedence)
level = {}
"#,
        config.render.width,
        config.render.height,
        archive_dir,
        config.http.timeout.map(|t| t.to_string()).unwrap_or_default(),
        config.http.user_agent,
        path_to_string(&config.logging.directory),
        config.logging.file,
        config.logging.level,
    )
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

//! INI parsing logic for converting `Ini` → `ConfigFile`.

use ini::Ini;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::LOG_LEVELS;
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [render] section
    if let Some(section) = ini.section(Some("render")) {
        if let Some(v) = section.get("width") {
            config.render.width = parse_positive("render", "width", v)?;
        }
        if let Some(v) = section.get("height") {
            config.render.height = parse_positive("render", "height", v)?;
        }
    }

    // [archive] section
    if let Some(section) = ini.section(Some("archive")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.archive.directory = Some(expand_tilde(v));
            }
        }
    }

    // [http] section
    if let Some(section) = ini.section(Some("http")) {
        if let Some(v) = section.get("timeout") {
            config.http.timeout = match v.trim() {
                "" => None,
                v => Some(parse_positive("http", "timeout", v)?),
            };
        }
        if let Some(v) = section.get("user_agent") {
            let v = v.trim();
            if v.is_empty() {
                return Err(invalid("http", "user_agent", v, "must not be empty"));
            }
            config.http.user_agent = v.to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
        if let Some(v) = section.get("level") {
            let v = v.trim().to_lowercase();
            if !LOG_LEVELS.contains(&v.as_str()) {
                return Err(invalid(
                    "logging",
                    "level",
                    &v,
                    "must be one of: trace, debug, info, warn, error",
                ));
            }
            config.logging.level = v;
        }
    }

    Ok(config)
}

fn parse_positive<T>(section: &str, key: &str, value: &str) -> Result<T, ConfigFileError>
where
    T: FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n != T::default() => Ok(n),
        _ => Err(invalid(section, key, value, "expected a positive integer")),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    fn load(contents: &str) -> Result<ConfigFile, ConfigFileError> {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, contents).unwrap();
        ConfigFile::load_from(&config_path)
    }

    #[test]
    fn test_full_config() {
        let config = load(
            r#"
[render]
width = 512
height = 256

[archive]
directory = /srv/tiles

[http]
timeout = 5
user_agent = my-renderer/2.0

[logging]
directory = /var/log/tilesnap
file = render.log
level = DEBUG
"#,
        )
        .unwrap();

        assert_eq!(config.render.width, 512);
        assert_eq!(config.render.height, 256);
        assert_eq!(config.archive.directory, Some(PathBuf::from("/srv/tiles")));
        assert_eq!(config.http.timeout, Some(5));
        assert_eq!(config.http.user_agent, "my-renderer/2.0");
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/tilesnap"));
        assert_eq!(config.logging.file, "render.log");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config() {
        let config = load("[render]\nwidth = 800\n").unwrap();

        assert_eq!(config.render.width, 800);
        assert_eq!(config.render.height, DEFAULT_HEIGHT);
        assert!(config.archive.directory.is_none());
        assert!(config.http.timeout.is_none());
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = load("[render]\nwidth = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref section, ref key, .. }
                if section == "render" && key == "width"
        ));
    }

    #[test]
    fn test_empty_timeout_means_none() {
        let config = load("[http]\ntimeout =\n").unwrap();
        assert!(config.http.timeout.is_none());
    }

    #[test]
    fn test_non_numeric_timeout_rejected() {
        let err = load("[http]\ntimeout = soon\n").unwrap_err();
        assert!(err.to_string().contains("http.timeout"));
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn test_invalid_log_level() {
        let err = load("[logging]\nlevel = loud\n").unwrap_err();
        assert!(err.to_string().contains("must be one of:"));
    }

    #[test]
    fn test_empty_archive_directory_ignored() {
        let config = load("[archive]\ndirectory =\n").unwrap();
        assert!(config.archive.directory.is_none());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/tiles");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("tiles"));
        }
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
    }
}

//! Local archive URL resolution.
//!
//! Archive URLs look like `mbtiles://<service>/{z}/{x}/{y}` for tiles and
//! `mbtiles://<service>` for the source itself. `<service>` names the file
//! `<archive_dir>/<service>.mbtiles`.

use super::ArchiveError;
use crate::coord::TileCoord;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// URL scheme of local archives.
pub const ARCHIVE_SCHEME: &str = "mbtiles";

/// File extension of local archives.
pub const ARCHIVE_EXTENSION: &str = "mbtiles";

pub(super) const SCHEME_PREFIX: &str = "mbtiles://";

/// A local archive reference derived from a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArchiveRef {
    /// Service name (archive file stem)
    pub service: String,
    /// Full path of the archive file
    pub path: PathBuf,
    /// Tile coordinate, present for tile URLs only
    pub tile: Option<TileCoord>,
}

/// Whether `url` uses the local archive scheme.
#[inline]
pub fn is_archive_url(url: &str) -> bool {
    url.starts_with(SCHEME_PREFIX)
}

/// Extracts the service name: the text after `mbtiles://` up to the next `/`.
pub fn service_name(url: &str) -> Result<&str, ArchiveError> {
    let rest = url
        .strip_prefix(SCHEME_PREFIX)
        .ok_or_else(|| ArchiveError::NotArchiveUrl(url.to_string()))?;

    let service = rest.split('/').next().unwrap_or_default();
    if service.is_empty() {
        return Err(ArchiveError::NotArchiveUrl(url.to_string()));
    }
    Ok(service)
}

/// Joins the archive directory, service name and archive extension.
///
/// No existence check is made; a missing file surfaces when it is opened.
pub fn archive_path(archive_dir: &Path, service: &str) -> PathBuf {
    archive_dir.join(format!("{}.{}", service, ARCHIVE_EXTENSION))
}

/// Get the tile URL regex pattern.
///
/// Pattern: `mbtiles://<service>/<z>/<x>/<y>`. Anything after the `y`
/// digits (an extension or query string) is ignored.
fn tile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^mbtiles://([^/]+)/(\d+)/(\d+)/(\d+)").expect("tile URL pattern is valid")
    })
}

/// Resolves a source URL to its archive file.
pub fn resolve_source(archive_dir: &Path, url: &str) -> Result<ResolvedArchiveRef, ArchiveError> {
    let service = service_name(url)?;
    Ok(ResolvedArchiveRef {
        service: service.to_string(),
        path: archive_path(archive_dir, service),
        tile: None,
    })
}

/// Resolves a tile URL to its archive file and tile coordinate.
///
/// # Errors
///
/// Returns [`ArchiveError::MalformedTileUrl`] when the URL has no trailing
/// `/{z}/{x}/{y}` triple. A triple naming a tile off the grid still resolves;
/// the archive lookup finds nothing for it.
pub fn resolve_tile(archive_dir: &Path, url: &str) -> Result<ResolvedArchiveRef, ArchiveError> {
    let malformed = |reason: String| ArchiveError::MalformedTileUrl {
        url: url.to_string(),
        reason,
    };

    let captures = tile_pattern()
        .captures(url)
        .ok_or_else(|| malformed("expected mbtiles://<service>/{z}/{x}/{y}".to_string()))?;

    let service = &captures[1];
    // The groups are digits only, so parsing fails on overflow alone. A value
    // too large for its field saturates, which still names no tile.
    let tile = TileCoord {
        zoom: captures[2].parse().unwrap_or(u8::MAX),
        x: captures[3].parse().unwrap_or(u32::MAX),
        y: captures[4].parse().unwrap_or(u32::MAX),
    };

    Ok(ResolvedArchiveRef {
        service: service.to_string(),
        path: archive_path(archive_dir, service),
        tile: Some(tile),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_archive_url() {
        assert!(is_archive_url("mbtiles://parks/1/0/0"));
        assert!(is_archive_url("mbtiles://parks"));
        assert!(!is_archive_url("https://tiles.example.com/1/0/0.png"));
        assert!(!is_archive_url("mbtiles:/parks"));
    }

    #[test]
    fn test_service_name() {
        assert_eq!(service_name("mbtiles://parks").unwrap(), "parks");
        assert_eq!(service_name("mbtiles://parks/").unwrap(), "parks");
        assert_eq!(service_name("mbtiles://parks/5/10/12").unwrap(), "parks");
    }

    #[test]
    fn test_service_name_rejects_other_schemes() {
        assert!(matches!(
            service_name("http://parks/1/2/3"),
            Err(ArchiveError::NotArchiveUrl(_))
        ));
        assert!(matches!(
            service_name("mbtiles:///1/2/3"),
            Err(ArchiveError::NotArchiveUrl(_))
        ));
    }

    #[test]
    fn test_archive_path_joins_extension() {
        let path = archive_path(Path::new("/srv/tiles"), "parks");
        assert_eq!(path, PathBuf::from("/srv/tiles/parks.mbtiles"));
    }

    #[test]
    fn test_resolve_tile() {
        let resolved = resolve_tile(Path::new("/srv/tiles"), "mbtiles://parks/5/10/12").unwrap();

        assert_eq!(resolved.service, "parks");
        assert_eq!(resolved.path, PathBuf::from("/srv/tiles/parks.mbtiles"));
        let tile = resolved.tile.unwrap();
        assert_eq!((tile.zoom, tile.x, tile.y), (5, 10, 12));
    }

    #[test]
    fn test_resolve_tile_ignores_extension() {
        let resolved = resolve_tile(Path::new("/srv"), "mbtiles://roads/3/1/2.pbf").unwrap();
        assert_eq!(resolved.tile, Some(TileCoord::new(3, 1, 2).unwrap()));
    }

    #[test]
    fn test_resolve_tile_missing_triple() {
        for url in [
            "mbtiles://parks",
            "mbtiles://parks/",
            "mbtiles://parks/5/10",
            "mbtiles://parks/a/b/c",
        ] {
            let result = resolve_tile(Path::new("/srv"), url);
            assert!(
                matches!(result, Err(ArchiveError::MalformedTileUrl { .. })),
                "{} should be malformed",
                url
            );
        }
    }

    #[test]
    fn test_resolve_tile_off_grid_still_resolves() {
        let resolved = resolve_tile(Path::new("/srv"), "mbtiles://parks/2/4/0").unwrap();
        let tile = resolved.tile.unwrap();
        assert_eq!((tile.zoom, tile.x, tile.y), (2, 4, 0));
        assert!(!tile.exists());

        let resolved = resolve_tile(Path::new("/srv"), "mbtiles://parks/31/0/0").unwrap();
        assert_eq!(resolved.tile.unwrap().zoom, 31);

        let resolved = resolve_tile(Path::new("/srv"), "mbtiles://parks/999/0/0").unwrap();
        assert!(!resolved.tile.unwrap().exists());
    }

    #[test]
    fn test_resolve_source() {
        let resolved = resolve_source(Path::new("base"), "mbtiles://parks").unwrap();
        assert_eq!(resolved.service, "parks");
        assert_eq!(resolved.path, Path::new("base").join("parks.mbtiles"));
        assert!(resolved.tile.is_none());
    }
}

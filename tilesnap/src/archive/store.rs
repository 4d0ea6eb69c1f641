//! Archive store boundary and the TileJSON document built from it.

use super::url::SCHEME_PREFIX;
use crate::coord::TileCoord;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single-file tile archive.
///
/// Each request opens its own handle, so implementations need not be
/// shareable; they are used from a blocking thread for the span of one query.
pub trait TileArchive: Sized {
    /// Store-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Open the archive at `path`. Must fail if the file does not exist.
    fn open(path: &Path) -> Result<Self, Self::Error>;

    /// Read the archive's info record.
    fn info(&self) -> Result<ArchiveInfo, Self::Error>;

    /// Look up one tile. `Ok(None)` means the archive has no such tile.
    fn tile(&self, tile: TileCoord) -> Result<Option<Vec<u8>>, Self::Error>;
}

/// Summary of an archive's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveInfo {
    /// Human-readable tileset name
    pub name: Option<String>,
    /// Tile format (`png`, `jpg`, `pbf`, ...)
    pub format: Option<String>,
    /// Lowest zoom level stored
    pub minzoom: u8,
    /// Highest zoom level stored
    pub maxzoom: u8,
    /// Default view as `[lng, lat, zoom]`
    pub center: Option<[f64; 3]>,
    /// Extent as `[west, south, east, north]`
    pub bounds: Option<[f64; 4]>,
}

/// TileJSON 2.1 document describing an archive-backed source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    /// TileJSON format version
    pub tilejson: String,
    /// Tile URL templates
    pub tiles: Vec<String>,
    /// Lowest zoom level
    pub minzoom: u8,
    /// Highest zoom level
    pub maxzoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl TileJson {
    /// TileJSON version written by [`TileJson::for_service`].
    pub const VERSION: &'static str = "2.1.0";

    /// Build the document for `service`, pointing its tile template back at
    /// the local archive scheme.
    pub fn for_service(service: &str, info: &ArchiveInfo) -> Self {
        Self {
            tilejson: Self::VERSION.to_string(),
            tiles: vec![format!("{}{}/{{z}}/{{x}}/{{y}}", SCHEME_PREFIX, service)],
            minzoom: info.minzoom,
            maxzoom: info.maxzoom,
            center: info.center,
            bounds: info.bounds,
            name: info.name.clone(),
            format: info.format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> ArchiveInfo {
        ArchiveInfo {
            name: Some("Parks".to_string()),
            format: Some("png".to_string()),
            minzoom: 0,
            maxzoom: 6,
            center: Some([-105.0, 39.5, 3.0]),
            bounds: Some([-110.0, 35.0, -100.0, 45.0]),
        }
    }

    #[test]
    fn test_tile_template_uses_archive_scheme() {
        let tilejson = TileJson::for_service("parks", &sample_info());
        assert_eq!(tilejson.tiles, vec!["mbtiles://parks/{z}/{x}/{y}"]);
        assert_eq!(tilejson.tilejson, "2.1.0");
    }

    #[test]
    fn test_serializes_info_fields() {
        let tilejson = TileJson::for_service("parks", &sample_info());
        let value = serde_json::to_value(&tilejson).unwrap();

        assert_eq!(value["minzoom"], 0);
        assert_eq!(value["maxzoom"], 6);
        assert_eq!(value["center"], serde_json::json!([-105.0, 39.5, 3.0]));
        assert_eq!(
            value["bounds"],
            serde_json::json!([-110.0, 35.0, -100.0, 45.0])
        );
    }

    #[test]
    fn test_omits_missing_fields() {
        let info = ArchiveInfo {
            name: None,
            format: None,
            minzoom: 1,
            maxzoom: 2,
            center: None,
            bounds: None,
        };
        let value = serde_json::to_value(TileJson::for_service("x", &info)).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("center"));
        assert!(!object.contains_key("bounds"));
        assert!(!object.contains_key("name"));
    }
}

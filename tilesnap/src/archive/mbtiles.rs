//! MBTiles archive store backed by SQLite.
//!
//! MBTiles keeps tiles in a `tiles(zoom_level, tile_column, tile_row,
//! tile_data)` table using TMS row order and descriptive key/value pairs in a
//! `metadata(name, value)` table.

use super::store::{ArchiveInfo, TileArchive};
use crate::coord::{tile_to_lat_lon, TileCoord, MAX_ZOOM};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading an MBTiles file.
#[derive(Debug, Error)]
pub enum MbtilesError {
    /// SQLite reported an error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A metadata row could not be parsed.
    #[error("Invalid metadata value {key} = '{value}'")]
    InvalidMetadata { key: String, value: String },

    /// The archive has neither zoom metadata nor any tiles.
    #[error("Archive contains no tiles")]
    Empty,
}

/// Read-only handle to an MBTiles file.
pub struct MbtilesArchive {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for MbtilesArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MbtilesArchive")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl MbtilesArchive {
    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn metadata(&self) -> Result<HashMap<String, String>, MbtilesError> {
        let mut statement = self
            .connection
            .prepare("SELECT name, value FROM metadata")?;
        let rows = statement.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;

        let mut metadata = HashMap::new();
        for row in rows {
            if let (name, Some(value)) = row? {
                metadata.insert(name, value);
            }
        }
        Ok(metadata)
    }

    fn zoom_range(&self) -> Result<Option<(u8, u8)>, MbtilesError> {
        let (min, max): (Option<i64>, Option<i64>) = self.connection.query_row(
            "SELECT MIN(zoom_level), MAX(zoom_level) FROM tiles",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((to_zoom("minzoom", min)?, to_zoom("maxzoom", max)?))),
            _ => Ok(None),
        }
    }

    /// Geographic extent of the tiles stored at `zoom`.
    fn tile_extent(&self, zoom: u8) -> Result<Option<[f64; 4]>, MbtilesError> {
        let extent: (Option<u32>, Option<u32>, Option<u32>, Option<u32>) = self.connection.query_row(
            "SELECT MIN(tile_column), MAX(tile_column), MIN(tile_row), MAX(tile_row) \
             FROM tiles WHERE zoom_level = ?1",
            params![zoom],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )?;

        let (Some(min_x), Some(max_x), Some(min_tms), Some(max_tms)) = extent else {
            return Ok(None);
        };

        if zoom > MAX_ZOOM {
            return Err(MbtilesError::InvalidMetadata {
                key: "zoom_level".to_string(),
                value: zoom.to_string(),
            });
        }
        let max_index = (1u64 << zoom) - 1;
        // The northernmost XYZ row is the largest TMS row.
        let flip = |tms: u32| max_index.saturating_sub(u64::from(tms)) as u32;

        let north_west = TileCoord {
            zoom,
            x: min_x,
            y: flip(max_tms),
        };
        let south_east = TileCoord {
            zoom,
            x: max_x.saturating_add(1),
            y: flip(min_tms).saturating_add(1),
        };

        let (north, west) = tile_to_lat_lon(&north_west);
        let (south, east) = tile_to_lat_lon(&south_east);
        Ok(Some([west, south, east, north]))
    }
}

impl TileArchive for MbtilesArchive {
    type Error = MbtilesError;

    fn open(path: &Path) -> Result<Self, Self::Error> {
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // SQLite reads the header lazily; touch the schema so a file that is
        // not a database fails here rather than on the first query.
        connection.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })?;

        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    fn info(&self) -> Result<ArchiveInfo, Self::Error> {
        let metadata = self.metadata()?;

        let zoom_range = match (metadata.get("minzoom"), metadata.get("maxzoom")) {
            (Some(min), Some(max)) => (parse_zoom("minzoom", min)?, parse_zoom("maxzoom", max)?),
            _ => self.zoom_range()?.ok_or(MbtilesError::Empty)?,
        };
        let (minzoom, maxzoom) = zoom_range;

        let bounds = match metadata.get("bounds") {
            Some(value) => Some(parse_floats::<4>("bounds", value)?),
            None => self.tile_extent(maxzoom)?,
        };

        let center = match metadata.get("center") {
            Some(value) => Some(parse_floats::<3>("center", value)?),
            None => bounds.map(|b| default_center(b, minzoom, maxzoom)),
        };

        Ok(ArchiveInfo {
            name: metadata.get("name").cloned(),
            format: metadata.get("format").cloned(),
            minzoom,
            maxzoom,
            center,
            bounds,
        })
    }

    fn tile(&self, tile: TileCoord) -> Result<Option<Vec<u8>>, Self::Error> {
        let Some(tms_row) = tile.tms_row() else {
            return Ok(None);
        };
        let data = self
            .connection
            .query_row(
                "SELECT tile_data FROM tiles \
                 WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
                params![tile.zoom, tile.x, tms_row],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(data)
    }
}

fn to_zoom(key: &str, value: i64) -> Result<u8, MbtilesError> {
    u8::try_from(value).map_err(|_| MbtilesError::InvalidMetadata {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_zoom(key: &str, value: &str) -> Result<u8, MbtilesError> {
    value
        .trim()
        .parse::<u8>()
        .map_err(|_| MbtilesError::InvalidMetadata {
            key: key.to_string(),
            value: value.to_string(),
        })
}

/// Parses a comma-separated list of exactly `N` numbers.
fn parse_floats<const N: usize>(key: &str, value: &str) -> Result<[f64; N], MbtilesError> {
    let invalid = || MbtilesError::InvalidMetadata {
        key: key.to_string(),
        value: value.to_string(),
    };

    let parsed = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    <[f64; N]>::try_from(parsed).map_err(|_| invalid())
}

/// Midpoint of `bounds` at a zoom inside the stored range.
fn default_center(bounds: [f64; 4], minzoom: u8, maxzoom: u8) -> [f64; 3] {
    let [west, south, east, north] = bounds;
    let range = maxzoom.saturating_sub(minzoom);
    let zoom = if range <= 1 {
        maxzoom
    } else {
        range / 2 + minzoom
    };
    [(west + east) / 2.0, (south + north) / 2.0, f64::from(zoom)]
}

/// Builders for MBTiles files used in tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Create an MBTiles file with the given metadata rows and XYZ tiles.
    pub(crate) fn create_archive(
        path: &Path,
        metadata: &[(&str, &str)],
        tiles: &[(TileCoord, &[u8])],
    ) {
        let connection = Connection::open(path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE metadata (name TEXT, value TEXT);
                 CREATE TABLE tiles (zoom_level INTEGER, tile_column INTEGER,
                                     tile_row INTEGER, tile_data BLOB);",
            )
            .unwrap();
        for (name, value) in metadata {
            connection
                .execute(
                    "INSERT INTO metadata (name, value) VALUES (?1, ?2)",
                    params![name, value],
                )
                .unwrap();
        }
        for (tile, data) in tiles {
            connection
                .execute(
                    "INSERT INTO tiles VALUES (?1, ?2, ?3, ?4)",
                    params![tile.zoom, tile.x, tile.tms_row().unwrap(), data],
                )
                .unwrap();
        }
    }

    /// A small archive named `<service>.mbtiles` in `dir` with one tile at 1/0/0.
    pub(crate) fn create_parks(dir: &Path, service: &str) -> PathBuf {
        let path = dir.join(format!("{}.mbtiles", service));
        create_archive(
            &path,
            &[
                ("name", "Parks"),
                ("format", "png"),
                ("minzoom", "0"),
                ("maxzoom", "4"),
                ("center", "-105,39.5,2"),
                ("bounds", "-110,35,-100,45"),
            ],
            &[(TileCoord::new(1, 0, 0).unwrap(), &b"tile-1-0-0"[..])],
        );
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let result = MbtilesArchive::open(&dir.path().join("nope.mbtiles"));
        assert!(result.is_err());
        assert!(!dir.path().join("nope.mbtiles").exists());
    }

    #[test]
    fn test_open_non_database_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bogus.mbtiles");
        std::fs::write(&path, b"this is definitely not a sqlite database file").unwrap();

        assert!(MbtilesArchive::open(&path).is_err());
    }

    #[test]
    fn test_info_from_metadata() {
        let dir = TempDir::new().unwrap();
        let path = create_parks(dir.path(), "parks");

        let archive = MbtilesArchive::open(&path).unwrap();
        let info = archive.info().unwrap();

        assert_eq!(info.name.as_deref(), Some("Parks"));
        assert_eq!(info.format.as_deref(), Some("png"));
        assert_eq!((info.minzoom, info.maxzoom), (0, 4));
        assert_eq!(info.center, Some([-105.0, 39.5, 2.0]));
        assert_eq!(info.bounds, Some([-110.0, 35.0, -100.0, 45.0]));
    }

    #[test]
    fn test_info_derives_missing_fields_from_tiles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("derived.mbtiles");
        create_archive(
            &path,
            &[],
            &[
                (TileCoord::new(0, 0, 0).unwrap(), &b"a"[..]),
                (TileCoord::new(1, 1, 1).unwrap(), &b"b"[..]),
            ],
        );

        let info = MbtilesArchive::open(&path).unwrap().info().unwrap();

        assert_eq!((info.minzoom, info.maxzoom), (0, 1));
        let [west, south, east, north] = info.bounds.unwrap();
        // Tile 1/1/1 is the south-east quadrant.
        assert!(west.abs() < 1e-9);
        assert!((east - 180.0).abs() < 1e-9);
        assert!(north.abs() < 1e-9);
        assert!((south + 85.0511).abs() < 1e-3);

        let [lng, lat, zoom] = info.center.unwrap();
        assert!((lng - 90.0).abs() < 1e-9);
        assert!(lat < 0.0);
        assert_eq!(zoom, 1.0);
    }

    #[test]
    fn test_info_fails_without_tiles_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.mbtiles");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE unrelated (id INTEGER);")
            .unwrap();

        let archive = MbtilesArchive::open(&path).unwrap();
        assert!(matches!(archive.info(), Err(MbtilesError::Sqlite(_))));
    }

    #[test]
    fn test_info_rejects_bad_bounds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.mbtiles");
        create_archive(
            &path,
            &[("minzoom", "0"), ("maxzoom", "1"), ("bounds", "1,2,3")],
            &[],
        );

        let result = MbtilesArchive::open(&path).unwrap().info();
        assert!(matches!(
            result,
            Err(MbtilesError::InvalidMetadata { ref key, .. }) if key == "bounds"
        ));
    }

    #[test]
    fn test_info_rejects_tiles_past_max_zoom() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deep.mbtiles");
        create_archive(&path, &[], &[]);
        Connection::open(&path)
            .unwrap()
            .execute("INSERT INTO tiles VALUES (70, 0, 0, x'00')", [])
            .unwrap();

        let result = MbtilesArchive::open(&path).unwrap().info();
        assert!(matches!(
            result,
            Err(MbtilesError::InvalidMetadata { ref key, ref value })
                if key == "zoom_level" && value == "70"
        ));
    }

    #[test]
    fn test_tile_lookup_flips_rows() {
        let dir = TempDir::new().unwrap();
        let path = create_parks(dir.path(), "parks");
        let archive = MbtilesArchive::open(&path).unwrap();

        let hit = archive.tile(TileCoord::new(1, 0, 0).unwrap()).unwrap();
        assert_eq!(hit.as_deref(), Some(&b"tile-1-0-0"[..]));

        // Same column, other row: absent.
        let miss = archive.tile(TileCoord::new(1, 0, 1).unwrap()).unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn test_tile_lookup_off_grid_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = create_parks(dir.path(), "parks");
        let archive = MbtilesArchive::open(&path).unwrap();

        let past_edge = archive.tile(TileCoord { zoom: 2, x: 4, y: 0 }).unwrap();
        assert!(past_edge.is_none());
        let too_deep = archive.tile(TileCoord { zoom: 31, x: 0, y: 0 }).unwrap();
        assert!(too_deep.is_none());
    }

    #[test]
    fn test_default_center_zoom() {
        assert_eq!(default_center([0.0, 0.0, 2.0, 2.0], 3, 4)[2], 4.0);
        assert_eq!(default_center([0.0, 0.0, 2.0, 2.0], 2, 10)[2], 6.0);
    }

    #[test]
    fn test_parse_floats() {
        assert_eq!(parse_floats::<3>("center", "1, 2,3").unwrap(), [1.0, 2.0, 3.0]);
        assert!(parse_floats::<3>("center", "1,2").is_err());
        assert!(parse_floats::<3>("center", "1,x,3").is_err());
    }
}

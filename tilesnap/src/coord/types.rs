//! Coordinate type definitions

use std::fmt;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Zoom levels addressable by tile URLs
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 30;

/// Tile coordinates in the XYZ (slippy map) scheme.
///
/// `y` counts from the north edge, as used by tile URLs. Archives that store
/// rows in the TMS scheme flip it with [`TileCoord::tms_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub zoom: u8,
    /// X coordinate (east-west), 0 at west
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
}

impl TileCoord {
    /// Create a tile coordinate, validating the zoom and the x/y range.
    pub fn new(zoom: u8, x: u32, y: u32) -> Result<Self, CoordError> {
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        let tile = Self { zoom, x, y };
        if !tile.exists() {
            return Err(CoordError::OutOfRange { zoom, x, y });
        }
        Ok(tile)
    }

    /// Whether the tile lies on the zoom level's grid.
    ///
    /// Coordinates built from the public fields are not checked, so tile
    /// URLs naming a tile past the edge of the world still parse.
    pub fn exists(&self) -> bool {
        if self.zoom > MAX_ZOOM {
            return false;
        }
        let tiles_per_side = 1u64 << self.zoom;
        u64::from(self.x) < tiles_per_side && u64::from(self.y) < tiles_per_side
    }

    /// Row index in the TMS scheme (0 at south), or `None` for a tile that
    /// does not exist.
    #[inline]
    pub fn tms_row(&self) -> Option<u32> {
        if !self.exists() {
            return None;
        }
        let max_index = (1u64 << self.zoom) - 1;
        u32::try_from(max_index - u64::from(self.y)).ok()
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Zoom level is outside valid range (0 to 30)
    InvalidZoom(u8),
    /// Column or row does not exist at the given zoom level
    OutOfRange { zoom: u8, x: u32, y: u32 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidZoom(zoom) => {
                write!(
                    f,
                    "Invalid zoom level: {} (must be between {} and {})",
                    zoom, MIN_ZOOM, MAX_ZOOM
                )
            }
            CoordError::OutOfRange { zoom, x, y } => {
                write!(f, "Tile {}/{}/{} does not exist at zoom {}", zoom, x, y, zoom)
            }
        }
    }
}

impl std::error::Error for CoordError {}

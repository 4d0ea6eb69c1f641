//! Coordinate conversion module
//!
//! Conversions between geographic coordinates (longitude/latitude), Web
//! Mercator world pixels and XYZ tile coordinates.

mod types;

pub use types::{CoordError, TileCoord, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM};

use std::f64::consts::PI;

/// Edge length of a slippy-map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Size of the whole world in pixels at a (possibly fractional) zoom level.
#[inline]
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2.0_f64.powf(zoom)
}

/// Projects a longitude/latitude pair to global pixel coordinates.
///
/// Latitude is clamped to the Web Mercator range so the poles stay finite.
/// The returned `(x, y)` has `y` growing southwards.
#[inline]
pub fn to_world_pixel(lon: f64, lat: f64, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);

    let x = (lon + 180.0) / 360.0 * size;

    let lat_rad = lat.clamp(MIN_LAT, MAX_LAT).to_radians();
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * size;

    (x.clamp(0.0, size), y.clamp(0.0, size))
}

/// Inverse of [`to_world_pixel`]; returns `(lon, lat)`.
#[inline]
pub fn from_world_pixel(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);

    let lon = x / size * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y / size)).sinh().atan();

    (lon, lat_rad.to_degrees())
}

/// Converts tile coordinates back to geographic coordinates.
///
/// Returns the latitude/longitude of the tile's northwest corner.
#[inline]
pub fn tile_to_lat_lon(tile: &TileCoord) -> (f64, f64) {
    let n = 2.0_f64.powi(i32::from(tile.zoom));

    // Convert tile X coordinate to longitude
    let lon = f64::from(tile.x) / n * 360.0 - 180.0;

    // Convert tile Y coordinate to latitude using inverse Web Mercator
    let y = f64::from(tile.y) / n;
    let lat_rad = (PI * (1.0 - 2.0 * y)).sinh().atan();
    let lat = lat_rad * 180.0 / PI;

    (lat, lon)
}

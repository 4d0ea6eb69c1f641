//! Geographic value types used by render requests.

use crate::render::ValidationError;

/// A geographic position as longitude/latitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl LngLat {
    /// Create a position from longitude and latitude.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Returns the position as a `[lng, lat]` array.
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl TryFrom<&[f64]> for LngLat {
    type Error = ValidationError;

    /// Accepts exactly `[lng, lat]`.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            [lng, lat] => Ok(Self::new(*lng, *lat)),
            _ => Err(ValidationError::CenterShape(values.len())),
        }
    }
}

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Western edge (minimum longitude)
    pub west: f64,
    /// Southern edge (minimum latitude)
    pub south: f64,
    /// Eastern edge (maximum longitude)
    pub east: f64,
    /// Northern edge (maximum latitude)
    pub north: f64,
}

impl Bounds {
    /// Create a bounding box from its four edges.
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// South-west corner.
    pub fn south_west(&self) -> LngLat {
        LngLat::new(self.west, self.south)
    }

    /// North-east corner.
    pub fn north_east(&self) -> LngLat {
        LngLat::new(self.east, self.north)
    }

    /// Whether `point` lies inside the box (edges included).
    pub fn contains(&self, point: LngLat) -> bool {
        (self.west..=self.east).contains(&point.lng)
            && (self.south..=self.north).contains(&point.lat)
    }

    /// Returns the box as `[west, south, east, north]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

impl TryFrom<&[f64]> for Bounds {
    type Error = ValidationError;

    /// Accepts exactly `[west, south, east, north]`.
    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        match values {
            [west, south, east, north] => Ok(Self::new(*west, *south, *east, *north)),
            _ => Err(ValidationError::BoundsShape(values.len())),
        }
    }
}

/// The zoom/center pair handed to the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Zoom level, possibly fractional
    pub zoom: f64,
    /// Geographic center of the view
    pub center: LngLat,
}

//! Caller-supplied render options and their validation.

use super::ValidationError;
use crate::viewport::{derive_viewport, Bounds, LngLat, Viewport};
use std::path::{Path, PathBuf};

/// Longitude range accepted for a center or bounds.
pub const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// Latitude range accepted for a center or bounds.
pub const LAT_RANGE: (f64, f64) = (-90.0, 90.0);

/// Zoom range accepted from callers.
pub const ZOOM_RANGE: (f64, f64) = (0.0, 22.0);

fn within((min, max): (f64, f64), value: f64) -> bool {
    (min..=max).contains(&value)
}

/// Viewport and source options for one render call.
///
/// Either `center` and `zoom`, or `bounds`, must be given. When both are,
/// the explicit center and zoom win; bounds only fill in what is missing.
///
/// # Example
///
/// ```
/// use tilesnap::render::RenderOptions;
///
/// let options = RenderOptions::new()
///     .with_bounds([-10.0, -10.0, 10.0, 10.0])
///     .with_archive_path("/srv/tiles");
/// let viewport = options.resolve_viewport(512, 512).unwrap();
/// assert!(viewport.zoom > 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    center: Option<Vec<f64>>,
    zoom: Option<f64>,
    bounds: Option<Vec<f64>>,
    archive_path: Option<PathBuf>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the center as `[lng, lat]`.
    pub fn with_center(mut self, center: impl Into<Vec<f64>>) -> Self {
        self.center = Some(center.into());
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Set the bounds as `[west, south, east, north]`.
    pub fn with_bounds(mut self, bounds: impl Into<Vec<f64>>) -> Self {
        self.bounds = Some(bounds.into());
        self
    }

    /// Directory of local archives, overriding the renderer's configured one.
    pub fn with_archive_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.archive_path = Some(path.into());
        self
    }

    pub fn center(&self) -> Option<&[f64]> {
        self.center.as_deref()
    }

    pub fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    pub fn bounds(&self) -> Option<&[f64]> {
        self.bounds.as_deref()
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.archive_path.as_deref()
    }

    /// Validate the options and resolve the viewport for a
    /// `width`×`height` image.
    ///
    /// # Errors
    ///
    /// A [`ValidationError`] for a malformed or out-of-range center, zoom or
    /// bounds, or [`ValidationError::MissingViewport`] when neither
    /// center+zoom nor bounds are available.
    pub fn resolve_viewport(&self, width: u32, height: u32) -> Result<Viewport, ValidationError> {
        let center = self.center.as_deref().map(validate_center).transpose()?;
        let zoom = self.zoom.map(validate_zoom).transpose()?;
        let bounds = self.bounds.as_deref().map(validate_bounds).transpose()?;

        match (center, zoom, bounds) {
            (Some(center), Some(zoom), _) => Ok(Viewport { zoom, center }),
            (center, zoom, Some(bounds)) => {
                let fitted = derive_viewport(&bounds, width, height);
                Ok(Viewport {
                    zoom: zoom.unwrap_or(fitted.zoom),
                    center: center.unwrap_or(fitted.center),
                })
            }
            _ => Err(ValidationError::MissingViewport),
        }
    }
}

/// Rejects a zero width or height.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), ValidationError> {
    if width == 0 || height == 0 {
        return Err(ValidationError::ZeroDimension { width, height });
    }
    Ok(())
}

fn validate_center(values: &[f64]) -> Result<LngLat, ValidationError> {
    let center = LngLat::try_from(values)?;
    if !within(LNG_RANGE, center.lng) {
        return Err(ValidationError::InvalidLongitude(center.lng));
    }
    if !within(LAT_RANGE, center.lat) {
        return Err(ValidationError::InvalidLatitude(center.lat));
    }
    Ok(center)
}

fn validate_zoom(zoom: f64) -> Result<f64, ValidationError> {
    if within(ZOOM_RANGE, zoom) {
        Ok(zoom)
    } else {
        Err(ValidationError::InvalidZoom(zoom))
    }
}

fn validate_bounds(values: &[f64]) -> Result<Bounds, ValidationError> {
    let bounds = Bounds::try_from(values)?;

    if !within(LNG_RANGE, bounds.west) || !within(LNG_RANGE, bounds.east) {
        return Err(ValidationError::InvalidBounds(format!(
            "longitudes must be between -180 and 180 (got {} and {})",
            bounds.west, bounds.east
        )));
    }
    if !within(LAT_RANGE, bounds.south) || !within(LAT_RANGE, bounds.north) {
        return Err(ValidationError::InvalidBounds(format!(
            "latitudes must be between -90 and 90 (got {} and {})",
            bounds.south, bounds.north
        )));
    }
    if bounds.west > bounds.east {
        return Err(ValidationError::AntimeridianBounds {
            west: bounds.west,
            east: bounds.east,
        });
    }
    if bounds.south > bounds.north {
        return Err(ValidationError::InvalidBounds(format!(
            "south must not exceed north (got {} and {})",
            bounds.south, bounds.north
        )));
    }
    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_center_and_zoom() {
        let viewport = RenderOptions::new()
            .with_center([-105.0, 39.5])
            .with_zoom(7.0)
            .resolve_viewport(512, 512)
            .unwrap();

        assert_eq!(viewport.center, LngLat::new(-105.0, 39.5));
        assert_eq!(viewport.zoom, 7.0);
    }

    #[test]
    fn test_explicit_values_win_over_bounds() {
        let bounds = [-10.0, -10.0, 10.0, 10.0];
        let fitted = derive_viewport(&Bounds::try_from(&bounds[..]).unwrap(), 512, 512);

        let both = RenderOptions::new()
            .with_center([100.0, 50.0])
            .with_zoom(3.0)
            .with_bounds(bounds)
            .resolve_viewport(512, 512)
            .unwrap();
        assert_eq!(both.center, LngLat::new(100.0, 50.0));
        assert_eq!(both.zoom, 3.0);

        let zoom_only = RenderOptions::new()
            .with_zoom(3.0)
            .with_bounds(bounds)
            .resolve_viewport(512, 512)
            .unwrap();
        assert_eq!(zoom_only.zoom, 3.0);
        assert_eq!(zoom_only.center, fitted.center);

        let center_only = RenderOptions::new()
            .with_center([1.0, 2.0])
            .with_bounds(bounds)
            .resolve_viewport(512, 512)
            .unwrap();
        assert_eq!(center_only.center, LngLat::new(1.0, 2.0));
        assert_eq!(center_only.zoom, fitted.zoom);
    }

    #[test]
    fn test_bounds_only() {
        let viewport = RenderOptions::new()
            .with_bounds([-10.0, -10.0, 10.0, 10.0])
            .resolve_viewport(512, 512)
            .unwrap();
        let expected = derive_viewport(&Bounds::new(-10.0, -10.0, 10.0, 10.0), 512, 512);
        assert_eq!(viewport, expected);
    }

    #[test]
    fn test_missing_viewport() {
        assert_eq!(
            RenderOptions::new().resolve_viewport(512, 512),
            Err(ValidationError::MissingViewport)
        );
        assert_eq!(
            RenderOptions::new()
                .with_center([0.0, 0.0])
                .resolve_viewport(512, 512),
            Err(ValidationError::MissingViewport)
        );
        assert_eq!(
            RenderOptions::new().with_zoom(4.0).resolve_viewport(512, 512),
            Err(ValidationError::MissingViewport)
        );
    }

    #[test]
    fn test_center_errors_are_distinct() {
        let resolve = |center: Vec<f64>| {
            RenderOptions::new()
                .with_center(center)
                .with_zoom(1.0)
                .resolve_viewport(256, 256)
                .unwrap_err()
        };

        assert_eq!(resolve(vec![1.0]), ValidationError::CenterShape(1));
        assert_eq!(resolve(vec![180.5, 0.0]), ValidationError::InvalidLongitude(180.5));
        assert_eq!(resolve(vec![0.0, -90.1]), ValidationError::InvalidLatitude(-90.1));
        assert!(matches!(
            resolve(vec![f64::NAN, 0.0]),
            ValidationError::InvalidLongitude(lng) if lng.is_nan()
        ));
    }

    #[test]
    fn test_zoom_range() {
        let resolve = |zoom: f64| {
            RenderOptions::new()
                .with_center([0.0, 0.0])
                .with_zoom(zoom)
                .resolve_viewport(256, 256)
        };

        assert!(resolve(0.0).is_ok());
        assert!(resolve(22.0).is_ok());
        assert_eq!(resolve(22.5), Err(ValidationError::InvalidZoom(22.5)));
        assert_eq!(resolve(-1.0), Err(ValidationError::InvalidZoom(-1.0)));
        assert!(resolve(f64::INFINITY).is_err());
    }

    #[test]
    fn test_bounds_errors() {
        let resolve =
            |bounds: Vec<f64>| RenderOptions::new().with_bounds(bounds).resolve_viewport(256, 256);

        assert_eq!(
            resolve(vec![0.0, 0.0, 1.0]),
            Err(ValidationError::BoundsShape(3))
        );
        assert_eq!(
            resolve(vec![170.0, 0.0, -170.0, 5.0]),
            Err(ValidationError::AntimeridianBounds {
                west: 170.0,
                east: -170.0
            })
        );
        assert!(matches!(
            resolve(vec![-10.0, 5.0, 10.0, 0.0]),
            Err(ValidationError::InvalidBounds(_))
        ));
        assert!(matches!(
            resolve(vec![-10.0, 0.0, 10.0, 95.0]),
            Err(ValidationError::InvalidBounds(_))
        ));
        assert!(matches!(
            resolve(vec![f64::NAN, 0.0, 10.0, 5.0]),
            Err(ValidationError::InvalidBounds(_))
        ));
    }

    #[test]
    fn test_validate_dimensions() {
        assert!(validate_dimensions(1, 1).is_ok());
        assert_eq!(
            validate_dimensions(0, 512),
            Err(ValidationError::ZeroDimension {
                width: 0,
                height: 512
            })
        );
        assert!(validate_dimensions(512, 0).is_err());
    }

    #[test]
    fn test_archive_path() {
        let options = RenderOptions::new().with_archive_path("/srv/tiles");
        assert_eq!(options.archive_path(), Some(Path::new("/srv/tiles")));
    }

    proptest! {
        /// Property: every in-range center passes validation.
        #[test]
        fn prop_valid_center_accepted(
            lng in -180.0f64..=180.0,
            lat in -90.0f64..=90.0,
            zoom in 0.0f64..=22.0,
        ) {
            let viewport = RenderOptions::new()
                .with_center([lng, lat])
                .with_zoom(zoom)
                .resolve_viewport(512, 512);
            prop_assert!(viewport.is_ok());
        }

        /// Property: an out-of-range longitude is always rejected.
        #[test]
        fn prop_out_of_range_longitude_rejected(
            lng in prop_oneof![-1000.0f64..-180.0001, 180.0001f64..1000.0],
            lat in -90.0f64..=90.0,
        ) {
            let result = RenderOptions::new()
                .with_center([lng, lat])
                .with_zoom(1.0)
                .resolve_viewport(512, 512);
            prop_assert_eq!(result, Err(ValidationError::InvalidLongitude(lng)));
        }
    }
}

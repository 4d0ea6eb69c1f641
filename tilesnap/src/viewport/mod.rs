//! Viewport derivation from a bounding box.
//!
//! When a render request carries bounds instead of an explicit center and
//! zoom, [`derive_viewport`] finds the zoom at which the box fits the output
//! image and the center of that fitted view. The returned zoom is one level
//! coarser than the exact fit (clamped at zero) so the box is fully visible
//! rather than inscribed edge to edge.

mod types;

pub use types::{Bounds, LngLat, Viewport};

use crate::coord::{from_world_pixel, to_world_pixel};

/// Lowest zoom the fitting computation returns.
pub const MIN_FIT_ZOOM: f64 = 0.0;

/// Highest zoom the fitting computation returns; also the reference zoom at
/// which pixel spans are measured.
pub const MAX_FIT_ZOOM: f64 = 20.0;

/// Zoom levels subtracted from the exact fit.
pub const FIT_MARGIN: f64 = 1.0;

/// Pixel extent of a bounding box at [`MAX_FIT_ZOOM`].
struct PixelSpan {
    width: f64,
    height: f64,
    center_x: f64,
    center_y: f64,
}

fn pixel_span(bounds: &Bounds) -> PixelSpan {
    let (left, bottom) = to_world_pixel(bounds.west, bounds.south, MAX_FIT_ZOOM);
    let (right, top) = to_world_pixel(bounds.east, bounds.north, MAX_FIT_ZOOM);

    let width = right - left;
    let height = bottom - top;

    PixelSpan {
        width,
        height,
        center_x: left + width / 2.0,
        center_y: top + height / 2.0,
    }
}

/// Largest (fractional) zoom at which `bounds` fits in `width`×`height`
/// pixels, clamped to [`MIN_FIT_ZOOM`, `MAX_FIT_ZOOM`].
///
/// A box with no extent along an axis places no constraint on that axis.
pub fn exact_fit_zoom(bounds: &Bounds, width: u32, height: u32) -> f64 {
    let span = pixel_span(bounds);

    let ratio_x = span.width / f64::from(width);
    let ratio_y = span.height / f64::from(height);

    let fitted = (MAX_FIT_ZOOM - ratio_x.log2()).min(MAX_FIT_ZOOM - ratio_y.log2());
    fitted.clamp(MIN_FIT_ZOOM, MAX_FIT_ZOOM)
}

/// Computes the viewport that shows `bounds` in a `width`×`height` image.
///
/// Deterministic and side-effect free. The zoom is
/// `max(exact_fit_zoom - 1, 0)` and the center is the midpoint of the box in
/// Web Mercator pixel space.
pub fn derive_viewport(bounds: &Bounds, width: u32, height: u32) -> Viewport {
    let span = pixel_span(bounds);
    let (lng, lat) = from_world_pixel(span.center_x, span.center_y, MAX_FIT_ZOOM);

    let zoom = (exact_fit_zoom(bounds, width, height) - FIT_MARGIN).max(MIN_FIT_ZOOM);

    Viewport {
        zoom,
        center: LngLat::new(lng, lat),
    }
}

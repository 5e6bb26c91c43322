//! Coordinate codec
//!
//! Converts caller-supplied geographic coordinates (latitude/longitude in
//! degrees) into the fixed-point integer pairs the query engine works with.

mod types;

pub use types::{FixedPointCoord, COORDINATE_PRECISION};

/// Scales a single coordinate component to fixed point.
///
/// The value is multiplied by [`COORDINATE_PRECISION`] and truncated toward
/// zero. The conversion is total: results outside the `i32` range saturate
/// and `NaN` maps to zero.
#[inline]
pub fn scale(value: f64) -> i32 {
    // `as` truncates toward zero and saturates on overflow.
    (value * COORDINATE_PRECISION) as i32
}

/// Converts a latitude/longitude pair to fixed-point coordinates.
///
/// No range validation is performed; the engine is responsible for
/// rejecting coordinates outside its dataset.
#[inline]
pub fn to_fixed(lat: f64, lon: f64) -> FixedPointCoord {
    FixedPointCoord {
        lat: scale(lat),
        lon: scale(lon),
    }
}

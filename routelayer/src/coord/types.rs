//! Coordinate type definitions

use serde::Serialize;
use std::fmt;

/// Fixed-point scale factor shared with the query engine.
///
/// One unit of a [`FixedPointCoord`] component is one millionth of a degree.
pub const COORDINATE_PRECISION: f64 = 1_000_000.0;

/// A geographic coordinate in the engine's fixed-point representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FixedPointCoord {
    /// Latitude in millionths of a degree
    pub lat: i32,
    /// Longitude in millionths of a degree
    pub lon: i32,
}

impl FixedPointCoord {
    /// Creates a coordinate from already-scaled components.
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }

    /// Converts back to degrees.
    ///
    /// This is lossy: the fractional part below the precision was discarded
    /// when the coordinate was scaled.
    #[inline]
    pub fn to_degrees(&self) -> (f64, f64) {
        (
            self.lat as f64 / COORDINATE_PRECISION,
            self.lon as f64 / COORDINATE_PRECISION,
        )
    }
}

impl fmt::Display for FixedPointCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat, lon) = self.to_degrees();
        write!(f, "({:.6}, {:.6})", lat, lon)
    }
}

//! Request descriptor types.

use crate::coord::FixedPointCoord;
use serde::Serialize;
use std::fmt;

/// Zoom level applied when the caller does not supply one (no generalization).
pub const DEFAULT_ZOOM_LEVEL: i16 = 18;

/// Minimum coordinate count for route and table requests.
pub const MIN_MULTI_COORDINATES: usize = 2;

/// Output format requested from the engine. Not caller-configurable.
pub const OUTPUT_FORMAT: &str = "json";

/// The service a request is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Shortest path through two or more waypoints.
    Route,
    /// Snap a coordinate to the closest graph node.
    Locate,
    /// Snap a coordinate to the closest point on a street segment.
    Nearest,
    /// Distance matrix between two or more coordinates.
    Table,
}

impl ServiceKind {
    /// Service name understood by the engine.
    pub fn engine_service(self) -> &'static str {
        match self {
            Self::Route => "viaroute",
            Self::Locate => "locate",
            Self::Nearest => "nearest",
            Self::Table => "table",
        }
    }

    /// Returns true if the service takes a single coordinate.
    pub fn is_single_point(self) -> bool {
        matches!(self, Self::Locate | Self::Nearest)
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route => write!(f, "route"),
            Self::Locate => write!(f, "locate"),
            Self::Nearest => write!(f, "nearest"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// A validated, immutable engine request.
///
/// Only the builders in [`crate::params`] construct descriptors, so every
/// descriptor satisfies the coordinate cardinality of its service kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestDescriptor {
    pub(crate) kind: ServiceKind,
    pub(crate) coordinates: Vec<FixedPointCoord>,
    pub(crate) alternate_route: bool,
    pub(crate) checksum: u32,
    pub(crate) zoom_level: i16,
    pub(crate) print_instructions: bool,
    pub(crate) jsonp_parameter: String,
    pub(crate) hints: Vec<String>,
}

impl RequestDescriptor {
    /// Creates a descriptor with every optional field at its default.
    pub(crate) fn with_defaults(kind: ServiceKind, coordinates: Vec<FixedPointCoord>) -> Self {
        Self {
            kind,
            coordinates,
            alternate_route: kind == ServiceKind::Route,
            checksum: 0,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            print_instructions: false,
            jsonp_parameter: String::new(),
            hints: Vec::new(),
        }
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn coordinates(&self) -> &[FixedPointCoord] {
        &self.coordinates
    }

    /// Whether an alternative route is requested (route only).
    pub fn alternate_route(&self) -> bool {
        self.alternate_route
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn zoom_level(&self) -> i16 {
        self.zoom_level
    }

    /// Whether turn-by-turn instructions are requested.
    pub fn print_instructions(&self) -> bool {
        self.print_instructions
    }

    /// JSONP callback name. Empty means no wrapping.
    pub fn jsonp_parameter(&self) -> &str {
        &self.jsonp_parameter
    }

    /// Per-coordinate hints. Null hints are stored as empty strings.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn output_format(&self) -> &'static str {
        OUTPUT_FORMAT
    }

    /// Route geometry is always requested.
    pub fn geometry(&self) -> bool {
        true
    }

    /// Geometry is always polyline-encoded.
    pub fn compression(&self) -> bool {
        true
    }

    /// Instruction language; unused by the engine, always empty.
    pub fn language(&self) -> &'static str {
        ""
    }

    pub fn engine_service(&self) -> &'static str {
        self.kind.engine_service()
    }
}

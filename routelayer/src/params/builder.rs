//! Per-service request builders.

use super::error::ValidationError;
use super::types::{RequestDescriptor, ServiceKind, MIN_MULTI_COORDINATES};
use crate::coord::{to_fixed, FixedPointCoord};
use serde_json::{Map, Value};

const COORDINATES: &str = "coordinates";
const ALTERNATE_ROUTE: &str = "alternateRoute";
const CHECKSUM: &str = "checksum";
const ZOOM_LEVEL: &str = "zoomLevel";
const PRINT_INSTRUCTIONS: &str = "printInstructions";
const JSONP_PARAMETER: &str = "jsonpParameter";
const HINTS: &str = "hints";

/// Validates `raw` for the given service and builds its descriptor.
pub fn build(kind: ServiceKind, raw: &Value) -> Result<RequestDescriptor, ValidationError> {
    match kind {
        ServiceKind::Route => build_route(raw),
        ServiceKind::Table => build_table(raw),
        ServiceKind::Locate => build_locate(raw),
        ServiceKind::Nearest => build_nearest(raw),
    }
}

/// Builds a route request from `{ coordinates, ...options }`.
///
/// Arrays are map-like but carry no fields, so they fail on the missing
/// `coordinates` property. Scalars are rejected as a malformed call.
pub fn build_route(raw: &Value) -> Result<RequestDescriptor, ValidationError> {
    let obj = match raw {
        Value::Object(obj) => Some(obj),
        Value::Array(_) => None,
        Value::Null => return Err(ValidationError::NotAnObject),
        _ => return Err(ValidationError::TwoArgumentsRequired),
    };
    let coordinates = obj
        .and_then(|obj| obj.get(COORDINATES))
        .ok_or(ValidationError::MissingCoordinates)?;

    let mut descriptor =
        RequestDescriptor::with_defaults(ServiceKind::Route, parse_coordinate_list(coordinates)?);
    if let Some(obj) = obj {
        apply_options(&mut descriptor, obj)?;
    }
    Ok(descriptor)
}

/// Builds a distance-table request from `{ coordinates, ...options }`.
///
/// Any non-null input is read as an object. A missing `coordinates` field,
/// including on scalars and arrays, is reported as malformed coordinates
/// rather than as a missing property.
pub fn build_table(raw: &Value) -> Result<RequestDescriptor, ValidationError> {
    let obj = match raw {
        Value::Object(obj) => Some(obj),
        Value::Null => return Err(ValidationError::NotAnObject),
        _ => None,
    };
    let coordinates = obj
        .and_then(|obj| obj.get(COORDINATES))
        .unwrap_or(&Value::Null);

    let mut descriptor =
        RequestDescriptor::with_defaults(ServiceKind::Table, parse_coordinate_list(coordinates)?);
    if let Some(obj) = obj {
        apply_options(&mut descriptor, obj)?;
    }
    Ok(descriptor)
}

/// Builds a locate request from a single `[lat, lon]` pair.
pub fn build_locate(raw: &Value) -> Result<RequestDescriptor, ValidationError> {
    build_single_point(ServiceKind::Locate, raw)
}

/// Builds a nearest request from a single `[lat, lon]` pair.
pub fn build_nearest(raw: &Value) -> Result<RequestDescriptor, ValidationError> {
    build_single_point(ServiceKind::Nearest, raw)
}

fn build_single_point(
    kind: ServiceKind,
    raw: &Value,
) -> Result<RequestDescriptor, ValidationError> {
    debug_assert!(kind.is_single_point());
    let coord = parse_pair(raw).ok_or(ValidationError::InvalidCoordinatePair)?;
    Ok(RequestDescriptor::with_defaults(kind, vec![coord]))
}

/// Parses an array of at least two `[lat, lon]` pairs.
///
/// The count is checked before the elements, so `[[1, 2]]` reports too few
/// coordinates even though its single element is well formed.
fn parse_coordinate_list(value: &Value) -> Result<Vec<FixedPointCoord>, ValidationError> {
    let list = value.as_array().ok_or(ValidationError::InvalidCoordinates)?;
    if list.len() < MIN_MULTI_COORDINATES {
        return Err(ValidationError::TooFewCoordinates);
    }

    list.iter()
        .map(|pair| parse_pair(pair).ok_or(ValidationError::InvalidCoordinates))
        .collect()
}

fn parse_pair(value: &Value) -> Option<FixedPointCoord> {
    match value.as_array()?.as_slice() {
        [lat, lon] => Some(to_fixed(lat.as_f64()?, lon.as_f64()?)),
        _ => None,
    }
}

/// Applies the optional route/table fields that are present.
///
/// Fields set to `null` count as absent. Types are checked strictly.
fn apply_options(
    descriptor: &mut RequestDescriptor,
    obj: &Map<String, Value>,
) -> Result<(), ValidationError> {
    if descriptor.kind == ServiceKind::Route {
        if let Some(value) = present(obj, ALTERNATE_ROUTE) {
            descriptor.alternate_route = expect_bool(ALTERNATE_ROUTE, value)?;
        }
    }

    if let Some(value) = present(obj, CHECKSUM) {
        descriptor.checksum = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(ValidationError::InvalidOption {
                field: CHECKSUM,
                expected: "an unsigned 32-bit integer",
            })?;
    }

    if let Some(value) = present(obj, ZOOM_LEVEL) {
        descriptor.zoom_level = value
            .as_i64()
            .and_then(|n| i16::try_from(n).ok())
            .ok_or(ValidationError::InvalidOption {
                field: ZOOM_LEVEL,
                expected: "a 16-bit integer",
            })?;
    }

    if let Some(value) = present(obj, PRINT_INSTRUCTIONS) {
        descriptor.print_instructions = expect_bool(PRINT_INSTRUCTIONS, value)?;
    }

    if let Some(value) = present(obj, JSONP_PARAMETER) {
        descriptor.jsonp_parameter = value
            .as_str()
            .ok_or(ValidationError::InvalidOption {
                field: JSONP_PARAMETER,
                expected: "a string",
            })?
            .to_string();
    }

    if let Some(value) = present(obj, HINTS) {
        descriptor.hints = parse_hints(value)?;
    }

    Ok(())
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|value| !value.is_null())
}

fn expect_bool(field: &'static str, value: &Value) -> Result<bool, ValidationError> {
    value.as_bool().ok_or(ValidationError::InvalidOption {
        field,
        expected: "a boolean",
    })
}

fn parse_hints(value: &Value) -> Result<Vec<String>, ValidationError> {
    let hints = value.as_array().ok_or(ValidationError::HintsNotArray)?;
    hints
        .iter()
        .map(|hint| match hint {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            _ => Err(ValidationError::InvalidHint),
        })
        .collect()
}

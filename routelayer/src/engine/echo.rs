//! Deterministic reference engine.
//!
//! [`EchoEngine`] stands in for the real routing engine: it renders the
//! validated request back as JSON. The CLI uses it to exercise the full
//! dispatch path, and tests use it as a known-good engine.

use super::{ConstructionError, DatasetSource, Engine, EngineError, EngineFactory};
use crate::coord::FixedPointCoord;
use crate::params::RequestDescriptor;
use serde_json::json;
use std::fs;
use std::io;
use std::sync::Arc;

/// Largest valid latitude in fixed-point units.
const MAX_FIXED_LAT: i32 = 90_000_000;

/// Largest valid longitude in fixed-point units.
const MAX_FIXED_LON: i32 = 180_000_000;

/// Engine that echoes the request it receives.
#[derive(Debug, Clone)]
pub struct EchoEngine {
    dataset: String,
}

impl EchoEngine {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
        }
    }
}

impl Engine for EchoEngine {
    fn query(&self, request: &RequestDescriptor) -> Result<Vec<u8>, EngineError> {
        if let Some(coord) = request.coordinates().iter().find(|c| !in_bounds(c)) {
            return Err(EngineError::new(format!(
                "coordinate {} is outside the dataset bounds",
                coord
            )));
        }

        let body = json!({
            "status": 0,
            "service": request.engine_service(),
            "dataset": self.dataset,
            "request": request,
        })
        .to_string();

        let payload = match request.jsonp_parameter() {
            "" => body,
            callback => format!("{}({});", callback, body),
        };
        Ok(payload.into_bytes())
    }
}

fn in_bounds(coord: &FixedPointCoord) -> bool {
    (-MAX_FIXED_LAT..=MAX_FIXED_LAT).contains(&coord.lat)
        && (-MAX_FIXED_LON..=MAX_FIXED_LON).contains(&coord.lon)
}

/// Factory for [`EchoEngine`].
///
/// Path sources must exist on disk. Shared memory is always available
/// unless disabled with [`without_shared_memory`](Self::without_shared_memory).
#[derive(Debug, Clone)]
pub struct EchoEngineFactory {
    shared_memory: bool,
}

impl EchoEngineFactory {
    pub fn new() -> Self {
        Self {
            shared_memory: true,
        }
    }

    /// Makes shared-memory construction fail, as on a host with no
    /// pre-loaded dataset.
    pub fn without_shared_memory(mut self) -> Self {
        self.shared_memory = false;
        self
    }
}

impl Default for EchoEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineFactory for EchoEngineFactory {
    fn create(&self, source: &DatasetSource) -> Result<Arc<dyn Engine>, ConstructionError> {
        match source {
            DatasetSource::Path(path) => {
                if let Err(e) = fs::metadata(path) {
                    if e.kind() == io::ErrorKind::NotFound {
                        return Err(ConstructionError::DatasetNotFound(
                            path.display().to_string(),
                        ));
                    }
                    return Err(e.into());
                }
                Ok(Arc::new(EchoEngine::new(path.display().to_string())))
            }
            DatasetSource::SharedMemory if self.shared_memory => {
                Ok(Arc::new(EchoEngine::new("shared-memory")))
            }
            DatasetSource::SharedMemory => Err(ConstructionError::SharedMemoryUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{build_nearest, build_route};
    use serde_json::{json, Value};

    #[test]
    fn test_echo_is_deterministic() {
        let engine = EchoEngine::new("test");
        let request = build_route(&json!({ "coordinates": [[1.0, 2.0], [3.0, 4.0]] })).unwrap();

        let first = engine.query(&request).unwrap();
        let second = engine.query(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_echo_payload_contents() {
        let engine = EchoEngine::new("berlin");
        let request = build_nearest(&json!([52.5, 13.25])).unwrap();

        let payload: Value = serde_json::from_slice(&engine.query(&request).unwrap()).unwrap();
        assert_eq!(payload["status"], 0);
        assert_eq!(payload["service"], "nearest");
        assert_eq!(payload["dataset"], "berlin");
        assert_eq!(payload["request"]["kind"], "nearest");
        assert_eq!(payload["request"]["coordinates"][0]["lat"], 52_500_000);
    }

    #[test]
    fn test_echo_wraps_jsonp() {
        let engine = EchoEngine::new("test");
        let request = build_route(&json!({
            "coordinates": [[1.0, 2.0], [3.0, 4.0]],
            "jsonpParameter": "handle",
        }))
        .unwrap();

        let payload = String::from_utf8(engine.query(&request).unwrap()).unwrap();
        assert!(payload.starts_with("handle({"));
        assert!(payload.ends_with(");"));
    }

    #[test]
    fn test_echo_rejects_out_of_bounds() {
        let engine = EchoEngine::new("test");
        let request = build_nearest(&json!([91.0, 0.0])).unwrap();

        let err = engine.query(&request).unwrap_err();
        assert_eq!(
            err.message(),
            "coordinate (91.000000, 0.000000) is outside the dataset bounds"
        );
    }

    #[test]
    fn test_factory_path_must_exist() {
        let factory = EchoEngineFactory::new();
        let missing = DatasetSource::Path("/definitely/not/here.osrm".into());
        assert!(matches!(
            factory.create(&missing),
            Err(ConstructionError::DatasetNotFound(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("map.osrm");
        std::fs::write(&dataset, b"").unwrap();
        assert!(factory.create(&DatasetSource::Path(dataset)).is_ok());
    }

    #[test]
    fn test_factory_reports_unreadable_path_as_io() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain-file");
        std::fs::write(&file, b"").unwrap();

        // A regular file used as a directory fails with ENOTDIR, not ENOENT.
        let source = DatasetSource::Path(file.join("map.osrm"));
        match EchoEngineFactory::new().create(&source) {
            Err(err @ ConstructionError::Io(_)) => {
                assert!(err.to_string().starts_with("I/O error: "));
            }
            Err(other) => panic!("expected an I/O error, got {:?}", other),
            Ok(_) => panic!("expected construction to fail"),
        }
    }

    #[test]
    fn test_factory_shared_memory() {
        assert!(EchoEngineFactory::new()
            .create(&DatasetSource::SharedMemory)
            .is_ok());
        assert!(matches!(
            EchoEngineFactory::new()
                .without_shared_memory()
                .create(&DatasetSource::SharedMemory),
            Err(ConstructionError::SharedMemoryUnavailable)
        ));
    }
}

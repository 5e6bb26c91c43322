use super::*;
use crate::engine::{ConstructionError, EchoEngineFactory, EngineError};
use crate::executor::testing::InlineWorkerPool;
use crate::executor::CompletionLoop;
use serde_json::json;
use std::sync::Mutex;

struct Fixture {
    osrm: Osrm,
    pool: Arc<InlineWorkerPool>,
    completions: CompletionLoop,
}

fn fixture() -> Fixture {
    let pool = Arc::new(InlineWorkerPool::default());
    let (dispatcher, completions) = Dispatcher::new(pool.clone());
    let osrm = Osrm::new(&[], &EchoEngineFactory::new(), dispatcher).unwrap();
    Fixture {
        osrm,
        pool,
        completions,
    }
}

fn recorder() -> (HostValue, Arc<Mutex<Vec<JobOutcome>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let callback = HostValue::function(move |outcome| sink.lock().unwrap().push(outcome));
    (callback, received)
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(InlineWorkerPool::default())).0
}

#[test]
fn test_new_without_args_uses_shared_memory() {
    let osrm = Osrm::new(&[], &EchoEngineFactory::new(), dispatcher()).unwrap();
    assert_eq!(osrm.engine().source(), &DatasetSource::SharedMemory);
    assert_eq!(osrm.in_flight(), 0);
}

#[test]
fn test_new_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("berlin.osrm");
    std::fs::write(&base, b"").unwrap();

    let args = [HostValue::from(json!(base.to_str().unwrap()))];
    let osrm = Osrm::new(&args, &EchoEngineFactory::new(), dispatcher()).unwrap();

    assert_eq!(osrm.engine().source(), &DatasetSource::Path(base));
}

#[test]
fn test_new_rejects_non_string_base_path() {
    for args in [
        vec![HostValue::from(json!(42))],
        vec![HostValue::function(|_| {})],
        vec![HostValue::from(json!("a")), HostValue::from(json!("b"))],
    ] {
        let err = Osrm::new(&args, &EchoEngineFactory::new(), dispatcher()).unwrap_err();
        assert_eq!(err.to_string(), "OSRM base path must be a string");
    }
}

#[test]
fn test_new_reports_construction_failure() {
    let err = Osrm::new(
        &[],
        &EchoEngineFactory::new().without_shared_memory(),
        dispatcher(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        BindingError::Construction(ConstructionError::SharedMemoryUnavailable)
    ));

    let args = [HostValue::from(json!("/nonexistent/berlin.osrm"))];
    let err = Osrm::new(&args, &EchoEngineFactory::new(), dispatcher()).unwrap_err();
    assert!(matches!(
        err,
        BindingError::Construction(ConstructionError::DatasetNotFound(_))
    ));
}

#[test]
fn test_route_success_delivered_through_loop() {
    let mut fx = fixture();
    let (callback, received) = recorder();

    fx.osrm
        .route(vec![
            HostValue::from(json!({"coordinates": [[52.519930, 13.438640], [52.513191, 13.415852]]})),
            callback,
        ])
        .unwrap();

    assert!(received.lock().unwrap().is_empty());
    assert_eq!(fx.osrm.in_flight(), 1);

    assert_eq!(fx.completions.process_pending(), 1);
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let payload: Value = serde_json::from_str(received[0].as_ref().unwrap()).unwrap();
    assert_eq!(payload["service"], "viaroute");
    assert_eq!(fx.osrm.in_flight(), 0);
}

#[test]
fn test_fewer_than_two_arguments() {
    let fx = fixture();
    let (callback, received) = recorder();

    let err = fx.osrm.locate(vec![callback]).unwrap_err();

    assert_eq!(err.to_string(), "two arguments required");
    assert_eq!(fx.pool.executed(), 0);
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn test_missing_callback_checked_after_parameters() {
    let fx = fixture();

    let err = fx
        .osrm
        .nearest(vec![HostValue::from(json!([1.0, 2.0])), HostValue::from(json!(null))])
        .unwrap_err();
    assert_eq!(err.to_string(), "last argument must be a callback function");

    // Parameter errors win over a missing callback.
    let err = fx
        .osrm
        .nearest(vec![HostValue::from(json!([1.0])), HostValue::from(json!(null))])
        .unwrap_err();
    assert_eq!(err.to_string(), "first argument must be an array of lat, long");

    assert_eq!(fx.pool.executed(), 0);
    assert_eq!(fx.osrm.in_flight(), 0);
}

#[test]
fn test_request_shape_errors_per_service() {
    let fx = fixture();
    let (callback, _) = recorder();
    let err = fx
        .osrm
        .route(vec![HostValue::from(json!([[1.0, 2.0], [3.0, 4.0]])), callback])
        .unwrap_err();
    assert_eq!(err.to_string(), "must provide a coordinates property");

    let (callback, _) = recorder();
    let err = fx
        .osrm
        .route(vec![HostValue::from(json!("berlin")), callback])
        .unwrap_err();
    assert_eq!(err.to_string(), "two arguments required");

    let (callback, _) = recorder();
    let err = fx
        .osrm
        .table(vec![HostValue::from(json!(5)), callback])
        .unwrap_err();
    assert_eq!(err.to_string(), "coordinates must be an array of (lat/long) pairs");

    assert_eq!(fx.pool.executed(), 0);
}

#[test]
fn test_function_as_request_rejected() {
    let fx = fixture();

    let err = fx
        .osrm
        .route(vec![HostValue::function(|_| {}), HostValue::function(|_| {})])
        .unwrap_err();
    assert_eq!(err.to_string(), "first arg must be an object");

    let err = fx
        .osrm
        .locate(vec![HostValue::function(|_| {}), HostValue::function(|_| {})])
        .unwrap_err();
    assert_eq!(err.to_string(), "first argument must be an array of lat, long");
}

#[test]
fn test_validation_failure_drops_callback_uninvoked() {
    let fx = fixture();
    let (callback, received) = recorder();

    let err = fx
        .osrm
        .route(vec![
            HostValue::from(json!({"coordinates": [[1.0, 2.0]]})),
            callback,
        ])
        .unwrap_err();

    assert_eq!(err.to_string(), "at least two coordinates must be provided");
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(fx.pool.executed(), 0);
}

#[test]
fn test_bad_hint_fails_before_dispatch() {
    let fx = fixture();
    let (callback, _received) = recorder();

    let err = fx
        .osrm
        .route(vec![
            HostValue::from(json!({
                "coordinates": [[1.0, 2.0], [3.0, 4.0]],
                "hints": ["abc", 7]
            })),
            callback,
        ])
        .unwrap_err();

    assert_eq!(err.to_string(), "hint must be null or string");
    assert_eq!(fx.pool.executed(), 0);
}

#[test]
fn test_table_without_coordinates() {
    let fx = fixture();
    let (callback, _received) = recorder();

    let err = fx
        .osrm
        .table(vec![HostValue::from(json!({})), callback])
        .unwrap_err();

    assert_eq!(err.to_string(), "coordinates must be an array of (lat/long) pairs");
}

#[test]
fn test_extra_arguments_ignored() {
    let mut fx = fixture();
    let (callback, received) = recorder();

    fx.osrm
        .locate(vec![
            HostValue::from(json!([52.4224, 13.333086])),
            HostValue::from(json!("ignored")),
            callback,
        ])
        .unwrap();
    fx.completions.process_pending();

    assert_eq!(received.lock().unwrap().len(), 1);
}

#[test]
fn test_engine_error_goes_to_callback() {
    let mut fx = fixture();
    let (callback, received) = recorder();

    let result = fx
        .osrm
        .nearest(vec![HostValue::from(json!([10.0, 200.0])), callback]);
    assert!(result.is_ok());
    fx.completions.process_pending();

    let received = received.lock().unwrap();
    assert_eq!(
        received[0],
        Err(EngineError::new(
            "coordinate (10.000000, 200.000000) is outside the dataset bounds"
        ))
    );
}

#[test]
fn test_typed_query() {
    let mut fx = fixture();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    fx.osrm
        .query(ServiceKind::Locate, &json!([1.5, 2.5]), move |outcome| {
            sink.lock().unwrap().push(outcome)
        })
        .unwrap();
    fx.completions.process_pending();

    assert_eq!(received.lock().unwrap().len(), 1);

    let err = fx
        .osrm
        .query(ServiceKind::Table, &json!("nope"), |_| {})
        .unwrap_err();
    assert!(err.is_validation());
}

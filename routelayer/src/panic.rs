//! Panic payload helpers.
//!
//! Engine queries and host callbacks run under `catch_unwind`; the payload
//! they leave behind is turned into a message here.

use std::any::Any;

/// Extracts the message from a caught panic payload.
///
/// `panic!` with a literal carries a `&str`, with format arguments a
/// `String`. Anything else is reported as unknown.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}

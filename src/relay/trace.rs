//! Trace id assignment.

use serde_json::{Map, Value};
use uuid::Uuid;

/// Payload field carrying the correlation id.
pub const TRACE_ID_FIELD: &str = "traceId";

/// Reuse a caller-supplied non-empty `traceId`, otherwise mint a UUID v4.
pub fn assign_trace_id(payload: &Map<String, Value>) -> String {
    match payload.get(TRACE_ID_FIELD) {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// Write `trace_id` into the payload, replacing whatever was there.
pub fn attach_trace_id(payload: &mut Map<String, Value>, trace_id: &str) {
    payload.insert(TRACE_ID_FIELD.to_string(), Value::String(trace_id.to_string()));
}

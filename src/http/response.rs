//! Response bodies for the relay endpoint.
//!
//! # Design Decisions
//! - Queue failures get a fixed message; the provider detail goes to logs and
//!   the audit record only
//! - Every body carries the trace id so callers can correlate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::relay::RelayOutcome;

/// Error text returned when the queue submission fails.
pub const QUEUE_FAILURE_MESSAGE: &str = "SQS send failed";

/// `200` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAccepted {
    pub status: String,
    pub trace_id: String,
    pub message_id: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFailed {
    pub error: String,
    pub trace_id: String,
}

/// Build an error response with the given status.
pub fn error_response(status: StatusCode, error: impl Into<String>, trace_id: impl Into<String>) -> Response {
    let body = SendFailed {
        error: error.into(),
        trace_id: trace_id.into(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for RelayOutcome {
    fn into_response(self) -> Response {
        match self {
            RelayOutcome::Sent { trace_id, message_id } => {
                let body = SendAccepted {
                    status: "ok".to_string(),
                    trace_id,
                    message_id,
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            RelayOutcome::Failed { trace_id, .. } => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, QUEUE_FAILURE_MESSAGE, trace_id)
            }
        }
    }
}

//! Audit record written once per relay outcome.

use serde::{Deserialize, Serialize};

/// Stage name recorded for queue submissions.
pub const STAGE_QUEUE_SEND: &str = "sqs_send";

/// Immutable audit record for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub stage: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqs_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditEvent {
    /// The queue accepted the message.
    pub fn sent(trace_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            stage: STAGE_QUEUE_SEND.to_string(),
            trace_id: trace_id.into(),
            sqs_message_id: Some(message_id.into()),
            status: Some("sent".to_string()),
            error: None,
        }
    }

    /// The queue submission failed.
    pub fn failed(trace_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            stage: STAGE_QUEUE_SEND.to_string(),
            trace_id: trace_id.into(),
            sqs_message_id: None,
            status: Some("failed".to_string()),
            error: Some(error.into()),
        }
    }
}

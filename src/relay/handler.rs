//! Per-request relay orchestration.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::audit::{AuditError, AuditEvent, SequencedLogAppender};
use crate::queue::{MessageId, QueueError, QueueSubmitter};
use crate::relay::trace::{assign_trace_id, attach_trace_id};

/// Caller-visible result of one relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Sent { trace_id: String, message_id: MessageId },
    Failed { trace_id: String, error: QueueError },
}

/// Ties one request to one queue submission and one audit append.
pub struct RelayHandler {
    submitter: QueueSubmitter,
    appender: Arc<SequencedLogAppender>,
}

impl RelayHandler {
    pub fn new(submitter: QueueSubmitter, appender: Arc<SequencedLogAppender>) -> Self {
        Self { submitter, appender }
    }

    /// Relay one payload.
    ///
    /// The audit append always happens after the queue call and its failure
    /// never changes the outcome.
    pub async fn relay(&self, mut payload: Map<String, Value>) -> RelayOutcome {
        let trace_id = assign_trace_id(&payload);
        attach_trace_id(&mut payload, &trace_id);
        let payload = Value::Object(payload);

        match self.submitter.submit(&payload).await {
            Ok(message_id) => {
                tracing::info!(trace_id = %trace_id, message_id = %message_id, "Sent message to queue");
                self.audit(AuditEvent::sent(&trace_id, &message_id)).await;
                RelayOutcome::Sent { trace_id, message_id }
            }
            Err(error) => {
                tracing::error!(trace_id = %trace_id, error = %error, "Queue submission failed");
                self.audit(AuditEvent::failed(&trace_id, error.to_string())).await;
                RelayOutcome::Failed { trace_id, error }
            }
        }
    }

    async fn audit(&self, event: AuditEvent) {
        match self.appender.append(&event).await {
            Ok(()) => {}
            Err(e @ AuditError::SequenceConflict { .. }) => {
                tracing::warn!(trace_id = %event.trace_id, error = %e, "Audit append lost sequence race");
            }
            Err(e) => {
                tracing::error!(trace_id = %event.trace_id, error = %e, "Audit append failed");
            }
        }
    }
}

//! Single-shot queue submission.

use std::sync::Arc;

use serde_json::Value;

use crate::observability::metrics;
use crate::queue::types::{MessageId, QueueClient, QueueError};

/// Submits trace-annotated payloads to the configured queue.
#[derive(Clone)]
pub struct QueueSubmitter {
    client: Arc<dyn QueueClient>,
}

impl QueueSubmitter {
    pub fn new(client: Arc<dyn QueueClient>) -> Self {
        Self { client }
    }

    /// Serialize `payload` and send it as one message.
    ///
    /// Failures are returned as-is; nothing is retried here.
    pub async fn submit(&self, payload: &Value) -> Result<MessageId, QueueError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| QueueError::Rejected(format!("payload not serializable: {e}")))?;

        match self.client.send_message(body).await {
            Ok(message_id) => {
                metrics::record_queue_submission("ok");
                tracing::debug!(message_id = %message_id, "Queue accepted message");
                Ok(message_id)
            }
            Err(e) => {
                metrics::record_queue_submission(e.kind());
                Err(e)
            }
        }
    }
}

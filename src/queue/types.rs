//! Queue client contract and error definitions.

use async_trait::async_trait;
use thiserror::Error;

/// Provider-assigned id of an accepted message.
pub type MessageId = String;

/// Errors that can occur while submitting to the queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The network call could not complete.
    #[error("queue unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with an error response.
    #[error("queue rejected message: {0}")]
    Rejected(String),
}

impl QueueError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            QueueError::Unavailable(_) => "unavailable",
            QueueError::Rejected(_) => "rejected",
        }
    }
}

/// A queue that accepts one text message per call.
#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn send_message(&self, body: String) -> Result<MessageId, QueueError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueueError::Unavailable("dispatch failure".into());
        assert_eq!(err.to_string(), "queue unavailable: dispatch failure");
        assert_eq!(err.kind(), "unavailable");

        let err = QueueError::Rejected("AccessDenied".into());
        assert!(err.to_string().contains("AccessDenied"));
        assert_eq!(err.kind(), "rejected");
    }
}

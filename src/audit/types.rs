//! Log stream contract and error definitions.

use async_trait::async_trait;
use thiserror::Error;

/// Opaque append position returned by the log service.
pub type SequenceToken = String;

/// Errors that can occur in the audit subsystem.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Log group or stream could not be ensured at startup.
    #[error("failed to provision log {resource} '{name}': {reason}")]
    ProvisioningFailed {
        resource: &'static str,
        name: String,
        reason: String,
    },

    /// The submitted token no longer matches the stream position.
    #[error("sequence token conflict (service expected {expected:?})")]
    SequenceConflict { expected: Option<SequenceToken> },

    /// Any other service or transport error on append.
    #[error("append rejected: {0}")]
    AppendRejected(String),

    /// The event could not be serialized.
    #[error("failed to encode audit event: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AuditError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            AuditError::ProvisioningFailed { .. } => "provisioning",
            AuditError::SequenceConflict { .. } => "conflict",
            AuditError::AppendRejected(_) => "rejected",
            AuditError::Encode(_) => "encode",
        }
    }
}

/// Result of a create-if-absent call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyPresent,
    Failed(String),
}

/// One timestamped record as handed to the log service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    pub message: String,
}

/// An append-only log service with sequence-token ordering.
#[async_trait]
pub trait LogStreamClient: Send + Sync {
    async fn create_log_group(&self, group: &str) -> ProvisionOutcome;

    async fn create_log_stream(&self, group: &str, stream: &str) -> ProvisionOutcome;

    /// Append one record using `token`, returning the token for the next append.
    ///
    /// `Ok(None)` means the service issued no token; the next append goes without one.
    async fn put_log_event(
        &self,
        group: &str,
        stream: &str,
        record: LogRecord,
        token: Option<SequenceToken>,
    ) -> Result<Option<SequenceToken>, AuditError>;
}

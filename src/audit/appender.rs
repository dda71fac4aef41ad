//! Sequence-token aware audit appender.
//!
//! The log service accepts an append only when it carries the token returned by
//! the previous one. Two appends that both read the same token will conflict,
//! so the whole read → put → write cycle runs under one async mutex. Tokio's
//! mutex is fair, which makes waiting appends proceed in arrival order.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::audit::event::AuditEvent;
use crate::audit::types::{AuditError, LogRecord, LogStreamClient, SequenceToken};
use crate::observability::metrics;

/// Sole owner of the rolling sequence token for one log stream.
pub struct SequencedLogAppender {
    client: Arc<dyn LogStreamClient>,
    log_group: String,
    log_stream: String,
    /// Unset until the first successful append.
    token: Mutex<Option<SequenceToken>>,
}

impl SequencedLogAppender {
    pub fn new(
        client: Arc<dyn LogStreamClient>,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Self {
        Self {
            client,
            log_group: log_group.into(),
            log_stream: log_stream.into(),
            token: Mutex::new(None),
        }
    }

    /// Append one event.
    ///
    /// On success the held token is replaced with the one the service returned
    /// before the next waiting append is let through. On failure it is left as
    /// it was. Nothing is retried.
    pub async fn append(&self, event: &AuditEvent) -> Result<(), AuditError> {
        let message = serde_json::to_string(event).map_err(|e| {
            metrics::record_audit_append("encode");
            AuditError::from(e)
        })?;

        let mut token = self.token.lock().await;
        // Stamped inside the gate so timestamps follow append order.
        let record = LogRecord {
            timestamp_millis: Utc::now().timestamp_millis(),
            message,
        };

        let result = self
            .client
            .put_log_event(&self.log_group, &self.log_stream, record, token.clone())
            .await;

        match result {
            Ok(next) => {
                tracing::trace!(
                    trace_id = %event.trace_id,
                    next_token = next.as_deref().unwrap_or("<none>"),
                    "Audit event appended"
                );
                *token = next;
                metrics::record_audit_append("ok");
                Ok(())
            }
            Err(e) => {
                metrics::record_audit_append(e.kind());
                Err(e)
            }
        }
    }

    /// Snapshot of the held token.
    pub async fn current_token(&self) -> Option<SequenceToken> {
        self.token.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::ProvisionOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    /// Emulates a stream that insists on the latest token.
    #[derive(Default)]
    struct StrictStream {
        state: StdMutex<StreamState>,
    }

    #[derive(Default)]
    struct StreamState {
        tail: Option<String>,
        issued: u32,
        submitted: Vec<Option<String>>,
        messages: Vec<String>,
    }

    #[async_trait]
    impl LogStreamClient for StrictStream {
        async fn create_log_group(&self, _group: &str) -> ProvisionOutcome {
            ProvisionOutcome::AlreadyPresent
        }

        async fn create_log_stream(&self, _group: &str, _stream: &str) -> ProvisionOutcome {
            ProvisionOutcome::AlreadyPresent
        }

        async fn put_log_event(
            &self,
            _group: &str,
            _stream: &str,
            record: LogRecord,
            token: Option<SequenceToken>,
        ) -> Result<Option<SequenceToken>, AuditError> {
            tokio::time::sleep(Duration::from_millis(2)).await;
            let mut state = self.state.lock().unwrap();
            state.submitted.push(token.clone());
            if token != state.tail {
                return Err(AuditError::SequenceConflict {
                    expected: state.tail.clone(),
                });
            }
            state.issued += 1;
            let next = format!("t-{}", state.issued);
            state.tail = Some(next.clone());
            state.messages.push(record.message);
            Ok(Some(next))
        }
    }

    fn appender(stream: Arc<StrictStream>) -> SequencedLogAppender {
        SequencedLogAppender::new(stream, "audit", "relay")
    }

    #[tokio::test]
    async fn test_first_append_has_no_token() {
        let stream = Arc::new(StrictStream::default());
        let appender = appender(stream.clone());

        appender.append(&AuditEvent::sent("abc", "m-1")).await.unwrap();

        let state = stream.state.lock().unwrap();
        assert_eq!(state.submitted, vec![None]);
        assert!(state.messages[0].contains("\"traceId\":\"abc\""));
        drop(state);
        assert_eq!(appender.current_token().await.as_deref(), Some("t-1"));
    }

    #[tokio::test]
    async fn test_sequential_appends_chain_tokens() {
        let stream = Arc::new(StrictStream::default());
        let appender = appender(stream.clone());

        for i in 0..3 {
            appender
                .append(&AuditEvent::sent(format!("trace-{i}"), format!("m-{i}")))
                .await
                .unwrap();
        }

        let state = stream.state.lock().unwrap();
        assert_eq!(
            state.submitted,
            vec![None, Some("t-1".to_string()), Some("t-2".to_string())]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_never_conflict() {
        let stream = Arc::new(StrictStream::default());
        let appender = Arc::new(appender(stream.clone()));

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..16 {
            let appender = appender.clone();
            tasks.spawn(async move {
                appender
                    .append(&AuditEvent::sent(format!("trace-{i}"), format!("m-{i}")))
                    .await
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let state = stream.state.lock().unwrap();
        assert_eq!(state.issued, 16);
        assert_eq!(state.submitted.len(), 16);
    }

    #[tokio::test]
    async fn test_conflict_keeps_held_token() {
        let stream = Arc::new(StrictStream::default());
        let appender = appender(stream.clone());
        appender.append(&AuditEvent::sent("a", "m-1")).await.unwrap();

        // Another writer moves the tail.
        stream.state.lock().unwrap().tail = Some("foreign".to_string());

        let err = appender.append(&AuditEvent::sent("b", "m-2")).await.unwrap_err();
        assert!(matches!(
            err,
            AuditError::SequenceConflict { expected: Some(ref t) } if t == "foreign"
        ));
        assert_eq!(appender.current_token().await.as_deref(), Some("t-1"));

        // The next append goes out with the unchanged token.
        let _ = appender.append(&AuditEvent::sent("c", "m-3")).await;
        let state = stream.state.lock().unwrap();
        assert_eq!(state.submitted.last().unwrap().as_deref(), Some("t-1"));
    }
}

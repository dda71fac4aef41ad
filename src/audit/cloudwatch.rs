//! Amazon CloudWatch Logs implementation of [`LogStreamClient`].

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::{DisplayErrorContext, SdkError};
use aws_sdk_cloudwatchlogs::operation::create_log_group::CreateLogGroupError;
use aws_sdk_cloudwatchlogs::operation::create_log_stream::CreateLogStreamError;
use aws_sdk_cloudwatchlogs::operation::put_log_events::PutLogEventsError;
use aws_sdk_cloudwatchlogs::types::InputLogEvent;

use crate::audit::types::{AuditError, LogRecord, LogStreamClient, ProvisionOutcome, SequenceToken};
use crate::sdk_error::summarize;

/// Thin wrapper over the CloudWatch Logs SDK client.
#[derive(Clone)]
pub struct CloudWatchLogStream {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl CloudWatchLogStream {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudwatchlogs::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl LogStreamClient for CloudWatchLogStream {
    async fn create_log_group(&self, group: &str) -> ProvisionOutcome {
        let result = self
            .client
            .create_log_group()
            .log_group_name(group)
            .send()
            .await
            .map(drop);

        provision_outcome(result, CreateLogGroupError::is_resource_already_exists_exception)
    }

    async fn create_log_stream(&self, group: &str, stream: &str) -> ProvisionOutcome {
        let result = self
            .client
            .create_log_stream()
            .log_group_name(group)
            .log_stream_name(stream)
            .send()
            .await
            .map(drop);

        provision_outcome(result, CreateLogStreamError::is_resource_already_exists_exception)
    }

    async fn put_log_event(
        &self,
        group: &str,
        stream: &str,
        record: LogRecord,
        token: Option<SequenceToken>,
    ) -> Result<Option<SequenceToken>, AuditError> {
        let event = InputLogEvent::builder()
            .timestamp(record.timestamp_millis)
            .message(record.message)
            .build()
            .map_err(|e| AuditError::AppendRejected(e.to_string()))?;

        let output = self
            .client
            .put_log_events()
            .log_group_name(group)
            .log_stream_name(stream)
            .log_events(event)
            .set_sequence_token(token)
            .send()
            .await
            .map_err(append_error)?;

        // The call still advanced the stream, so the token must be kept.
        if let Some(rejected) = output.rejected_log_events_info() {
            tracing::warn!(info = ?rejected, "Log service dropped the audit event");
        }
        Ok(output.next_sequence_token().map(str::to_owned))
    }
}

/// "Already exists" is success for provisioning.
fn provision_outcome<E, R>(result: Result<(), SdkError<E, R>>, already_exists: fn(&E) -> bool) -> ProvisionOutcome
where
    E: Error + 'static,
    R: Debug,
{
    match result {
        Ok(()) => ProvisionOutcome::Created,
        Err(err) if err.as_service_error().is_some_and(already_exists) => ProvisionOutcome::AlreadyPresent,
        Err(err) => {
            tracing::error!(error = %DisplayErrorContext(&err), "CloudWatch Logs provisioning call failed");
            ProvisionOutcome::Failed(summarize(&err))
        }
    }
}

fn append_error<R: Debug>(err: SdkError<PutLogEventsError, R>) -> AuditError {
    match err.as_service_error() {
        Some(PutLogEventsError::InvalidSequenceTokenException(e)) => AuditError::SequenceConflict {
            expected: e.expected_sequence_token().map(str::to_owned),
        },
        _ => {
            tracing::error!(error = %DisplayErrorContext(&err), "PutLogEvents failed");
            AuditError::AppendRejected(summarize(&err))
        }
    }
}

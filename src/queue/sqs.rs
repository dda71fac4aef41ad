//! Amazon SQS implementation of [`QueueClient`].

use async_trait::async_trait;
use aws_sdk_sqs::error::{DisplayErrorContext, SdkError};

use crate::queue::types::{MessageId, QueueClient, QueueError};
use crate::sdk_error::summarize;

/// Sends messages to a single SQS queue.
#[derive(Clone)]
pub struct SqsQueueClient {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsQueueClient {
    pub fn new(sdk_config: &aws_config::SdkConfig, queue_url: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_sqs::Client::new(sdk_config),
            queue_url: queue_url.into(),
        }
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn send_message(&self, body: String) -> Result<MessageId, QueueError> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(classify)?;

        output
            .message_id()
            .map(str::to_owned)
            .ok_or_else(|| QueueError::Rejected("response carried no message id".to_string()))
    }
}

/// Service and construction errors mean the request itself was refused;
/// everything else is a transport problem.
fn classify<E, R>(err: SdkError<E, R>) -> QueueError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    tracing::error!(error = %DisplayErrorContext(&err), "SQS SendMessage failed");
    let detail = summarize(&err);
    match err {
        SdkError::ServiceError(_) | SdkError::ConstructionFailure(_) => QueueError::Rejected(detail),
        _ => QueueError::Unavailable(detail),
    }
}

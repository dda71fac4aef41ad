//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the AWS SDK configuration and service clients
//! - Provision the audit log group and stream
//! - Bind the listener (traffic only when ready)

use std::sync::Arc;

use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_sqs::config::{Credentials, Region};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::audit::{AuditError, CloudWatchLogStream, LogStreamClient, ResourceProvisioner, SequencedLogAppender};
use crate::config::{AwsConfig, RelayConfig};
use crate::http::HttpServer;
use crate::queue::{QueueClient, QueueSubmitter, SqsQueueClient};
use crate::relay::RelayHandler;

/// Errors that prevent the relay from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Provisioning(#[from] AuditError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A provisioned relay with its listener bound, ready to serve.
pub struct Started {
    pub server: HttpServer,
    pub listener: TcpListener,
}

/// Resolve the shared AWS SDK configuration.
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some((key, secret)) = aws.static_credentials() {
        loader = loader.credentials_provider(Credentials::new(key, secret, None, None, "relay-config"));
    }
    if let Some(endpoint) = &aws.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}

/// Start against the real SQS and CloudWatch Logs services.
pub async fn start(config: &RelayConfig) -> Result<Started, StartupError> {
    let sdk_config = load_sdk_config(&config.aws).await;
    tracing::info!(
        region = ?sdk_config.region(),
        queue_url = %config.queue.url,
        "AWS clients configured"
    );

    let queue = Arc::new(SqsQueueClient::new(&sdk_config, config.queue.url.clone()));
    let logs = Arc::new(CloudWatchLogStream::new(&sdk_config));
    assemble(config, queue, logs).await
}

/// Provision, wire the pipeline and bind, in that order.
pub async fn assemble(
    config: &RelayConfig,
    queue: Arc<dyn QueueClient>,
    logs: Arc<dyn LogStreamClient>,
) -> Result<Started, StartupError> {
    let audit = &config.audit;

    let report = ResourceProvisioner::new(logs.clone(), &audit.log_group, &audit.log_stream)
        .ensure()
        .await?;
    tracing::info!(
        log_group = %audit.log_group,
        log_stream = %audit.log_stream,
        group = ?report.group,
        stream = ?report.stream,
        "Audit log ready"
    );

    let appender = Arc::new(SequencedLogAppender::new(logs, &audit.log_group, &audit.log_stream));
    let relay = Arc::new(RelayHandler::new(QueueSubmitter::new(queue), appender));

    let listener = TcpListener::bind(&config.server.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.server.bind_address.clone(),
            source,
        })?;

    Ok(Started {
        server: HttpServer::new(config.server.clone(), relay),
        listener,
    })
}

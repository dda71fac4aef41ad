//! Idempotent log group / stream provisioning.
//!
//! Two relay instances starting together will race on creation, so an
//! already-present resource is a normal outcome rather than an error.

use std::sync::Arc;

use crate::audit::types::{AuditError, LogStreamClient, ProvisionOutcome};
use crate::observability::metrics;

/// What provisioning found for each resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub group: ProvisionOutcome,
    pub stream: ProvisionOutcome,
}

/// Ensures the audit log group and stream exist.
pub struct ResourceProvisioner {
    client: Arc<dyn LogStreamClient>,
    log_group: String,
    log_stream: String,
}

impl ResourceProvisioner {
    pub fn new(
        client: Arc<dyn LogStreamClient>,
        log_group: impl Into<String>,
        log_stream: impl Into<String>,
    ) -> Self {
        Self {
            client,
            log_group: log_group.into(),
            log_stream: log_stream.into(),
        }
    }

    /// Create the group, then the stream. Any failure other than
    /// already-present aborts with [`AuditError::ProvisioningFailed`].
    pub async fn ensure(&self) -> Result<ProvisionReport, AuditError> {
        let group = self.client.create_log_group(&self.log_group).await;
        settle("group", &self.log_group, &group)?;

        let stream = self
            .client
            .create_log_stream(&self.log_group, &self.log_stream)
            .await;
        settle("stream", &self.log_stream, &stream)?;

        Ok(ProvisionReport { group, stream })
    }
}

fn settle(resource: &'static str, name: &str, outcome: &ProvisionOutcome) -> Result<(), AuditError> {
    match outcome {
        ProvisionOutcome::Created => {
            metrics::record_provisioning(resource, "created");
            tracing::info!(resource, name, "Created log resource");
            Ok(())
        }
        ProvisionOutcome::AlreadyPresent => {
            metrics::record_provisioning(resource, "already_present");
            tracing::info!(resource, name, "Log resource already exists");
            Ok(())
        }
        ProvisionOutcome::Failed(reason) => {
            metrics::record_provisioning(resource, "failed");
            Err(AuditError::ProvisioningFailed {
                resource,
                name: name.to_string(),
                reason: reason.clone(),
            })
        }
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// AWS region, credentials and endpoint override.
    pub aws: AwsConfig,

    /// Target queue.
    pub queue: QueueConfig,

    /// Audit log group and stream.
    pub audit: AuditConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,

    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            max_body_bytes: 256 * 1024, // SQS message size limit
        }
    }
}

/// AWS client configuration.
///
/// Static credentials are only used when both halves are present; otherwise the
/// SDK default provider chain resolves them.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,

    /// Endpoint override, e.g. a LocalStack URL.
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Returns the static key pair if both halves are configured.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Queue configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct QueueConfig {
    /// Queue URL messages are sent to.
    pub url: String,
}

/// Audit log destination.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    pub log_group: String,
    pub log_stream: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_group: "sqs-relay-audit".to_string(),
            log_stream: "relay".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
        assert_eq!(config.server.max_body_bytes, 262_144);
        assert!(config.queue.url.is_empty());
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RelayConfig = toml::from_str(
            r#"
            [queue]
            url = "https://sqs.eu-west-1.amazonaws.com/123456789012/orders"

            [audit]
            log_group = "orders-audit"
            "#,
        )
        .unwrap();

        assert_eq!(config.audit.log_group, "orders-audit");
        assert_eq!(config.audit.log_stream, "relay");
        assert_eq!(config.server.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_static_credentials_need_both_halves() {
        let mut aws = AwsConfig {
            access_key_id: Some("AKIA".into()),
            ..Default::default()
        };
        assert!(aws.static_credentials().is_none());

        aws.secret_access_key = Some("secret".into());
        assert_eq!(aws.static_credentials(), Some(("AKIA", "secret")));
    }
}

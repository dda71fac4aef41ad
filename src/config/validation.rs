//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and name constraints of the log service
//! - Check that paired settings are supplied together
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Log group and stream names are limited to 512 characters.
const MAX_LOG_NAME_LEN: usize = 512;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Missing { field: &'static str },

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Validate a loaded configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.queue.url.trim().is_empty() {
        errors.push(ValidationError::Missing { field: "queue.url" });
    }

    check_log_name(&mut errors, "audit.log_group", &config.audit.log_group);
    check_log_name(&mut errors, "audit.log_stream", &config.audit.log_stream);
    if config.audit.log_stream.contains(':') {
        errors.push(ValidationError::Invalid {
            field: "audit.log_stream",
            reason: "':' is not allowed in stream names".to_string(),
        });
    }

    if let Err(e) = config.server.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::Invalid {
            field: "server.bind_address",
            reason: e.to_string(),
        });
    }

    if config.server.max_body_bytes == 0 {
        errors.push(ValidationError::Invalid {
            field: "server.max_body_bytes",
            reason: "must be greater than zero".to_string(),
        });
    }

    if config.aws.access_key_id.is_some() != config.aws.secret_access_key.is_some() {
        errors.push(ValidationError::Invalid {
            field: "aws.access_key_id",
            reason: "access key and secret key must be set together".to_string(),
        });
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::Invalid {
                field: "observability.metrics_address",
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_log_name(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError::Missing { field });
    } else if value.len() > MAX_LOG_NAME_LEN {
        errors.push(ValidationError::Invalid {
            field,
            reason: format!("longer than {MAX_LOG_NAME_LEN} characters"),
        });
    }
}

//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(".env error: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment overrides
/// and validate the result.
///
/// A `.env` file in the working directory (or a parent) is read into the
/// process environment first; variables already set are not replaced.
/// `bind_override` comes from the command line and wins over both sources.
pub fn load_config(path: Option<&Path>, bind_override: Option<&str>) -> Result<RelayConfig, ConfigError> {
    ignore_missing(dotenvy::dotenv())?;
    resolve(path, bind_override, |name| std::env::var(name).ok())
}

fn resolve<F>(path: Option<&Path>, bind_override: Option<&str>, lookup: F) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, lookup)?;
    if let Some(bind) = bind_override {
        config.server.bind_address = bind.to_string();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// A missing `.env` is not an error; a malformed one is.
fn ignore_missing<T>(result: Result<T, dotenvy::Error>) -> Result<Option<T>, ConfigError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(ConfigError::Dotenv(e)),
    }
}

fn parse_file(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables on top of `config`.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(region) = var("AWS_REGION") {
        config.aws.region = Some(region);
    }
    if let Some(key) = var("AWS_ACCESS_KEY") {
        config.aws.access_key_id = Some(key);
    }
    if let Some(secret) = var("AWS_SECRET_KEY") {
        config.aws.secret_access_key = Some(secret);
    }
    if let Some(endpoint) = var("AWS_ENDPOINT_URL") {
        config.aws.endpoint_url = Some(endpoint);
    }
    if let Some(url) = var("SQS_QUEUE_URL") {
        config.queue.url = url;
    }
    if let Some(group) = var("LOG_GROUP_NAME") {
        config.audit.log_group = group;
    }
    if let Some(stream) = var("LOG_STREAM_NAME") {
        config.audit.log_stream = stream;
    }
    if let Some(level) = var("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(port) = var("PORT") {
        let port: u16 = port.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env {
                name: "PORT",
                reason: e.to_string(),
            }
        })?;
        config.server.bind_address = format!("0.0.0.0:{port}");
    }

    Ok(())
}

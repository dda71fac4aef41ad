//! SQS relay with audit trail.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /send ──▶ http::server ──▶ relay::handler ──┬──▶ queue::submitter ──▶ SQS
//!                                                   │
//!                                                   └──▶ audit::appender ───▶ CloudWatch Logs
//!                                                          (token gate)
//!
//!   startup: config ─▶ AWS clients ─▶ audit::provisioner ─▶ bind listener
//! ```

use std::path::PathBuf;

use clap::Parser;

use sqs_audit_relay::config::load_config;
use sqs_audit_relay::lifecycle::{self, signals, Shutdown};
use sqs_audit_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "sqs-audit-relay")]
#[command(about = "Relay JSON payloads to SQS with a CloudWatch Logs audit trail", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 127.0.0.1:3000).
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.bind.as_deref())?;

    logging::init(&config.observability.log_level);
    tracing::info!("sqs-audit-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        log_group = %config.audit.log_group,
        log_stream = %config.audit.log_stream,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let started = lifecycle::start(&config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&shutdown).await;
    });

    started.server.run(started.listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

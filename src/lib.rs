//! SQS relay with a sequenced CloudWatch Logs audit trail.

pub mod audit;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod queue;
pub mod relay;
pub mod sdk_error;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{RelayHandler, RelayOutcome};

//! Audit trail subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     provisioner.rs → create log group → create log stream
//!     (already-present counts as success)
//!
//! Per request:
//!     AuditEvent (event.rs)
//!     → appender.rs (gate → read token → put → write token)
//!     → LogStreamClient (cloudwatch.rs in production)
//! ```
//!
//! # Design Decisions
//! - The sequence token has exactly one owner: SequencedLogAppender
//! - Appends are serialized behind one async mutex, FIFO across requests
//! - Failed appends never touch the token and are never retried

pub mod appender;
pub mod cloudwatch;
pub mod event;
pub mod provisioner;
pub mod types;

pub use appender::SequencedLogAppender;
pub use cloudwatch::CloudWatchLogStream;
pub use event::AuditEvent;
pub use provisioner::{ProvisionReport, ResourceProvisioner};
pub use types::{AuditError, LogRecord, LogStreamClient, ProvisionOutcome, SequenceToken};

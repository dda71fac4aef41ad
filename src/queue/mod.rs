//! Message queue subsystem.
//!
//! # Data Flow
//! ```text
//! trace-annotated payload
//!     → submitter.rs (serialize, single send, metrics)
//!     → QueueClient (sqs.rs in production, in-memory fakes in tests)
//!     → provider message id | QueueError
//! ```
//!
//! # Design Decisions
//! - Exactly one send per call; retry policy belongs outside the relay
//! - Transport failures and provider rejections are distinct error kinds

pub mod sqs;
pub mod submitter;
pub mod types;

pub use sqs::SqsQueueClient;
pub use submitter::QueueSubmitter;
pub use types::{MessageId, QueueClient, QueueError};

//! Relay pipeline.
//!
//! # Data Flow
//! ```text
//! JSON object payload
//!     → trace.rs (reuse caller traceId or mint a UUID, write it into the payload)
//!     → QueueSubmitter (exactly one send)
//!     → AuditEvent (sent | failed)
//!     → SequencedLogAppender (exactly one append, best effort)
//!     → RelayOutcome (only the queue result is caller-visible)
//! ```

pub mod handler;
pub mod trace;

pub use handler::{RelayHandler, RelayOutcome};
pub use trace::{assign_trace_id, attach_trace_id, TRACE_ID_FIELD};

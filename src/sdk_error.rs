//! Short descriptions of AWS SDK failures.
//!
//! `DisplayErrorContext` walks the whole error chain, including the raw HTTP
//! response. That belongs in local logs. Text that leaves the process (the
//! audit record's `error` field) uses [`summarize`] instead.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_sqs::error::SdkError;

/// The service's own code and message for service errors, otherwise the
/// failure kind and its immediate cause.
pub fn summarize<E, R>(err: &SdkError<E, R>) -> String
where
    E: Error + 'static,
    R: Debug,
{
    match err {
        SdkError::ServiceError(context) => context.err().to_string(),
        other => match other.source() {
            Some(source) => format!("{other}: {source}"),
            None => other.to_string(),
        },
    }
}

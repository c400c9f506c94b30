//! Per-segment retry with bounded exponential backoff.
//!
//! Splits error classification (timeouts, throttling, connection failures)
//! from the backoff decision so the fetch dispatcher can retry each segment
//! independently without re-fetching segments that already succeeded.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::SegmentError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;

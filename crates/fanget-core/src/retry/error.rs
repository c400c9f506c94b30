//! Error type for a single segment fetch, kept structured so the policy can
//! classify it before it is folded into the request-level taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegmentError {
    /// libcurl reported an error (timeout, connection, TLS, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),

    /// Non-2xx response to the range request.
    #[error("HTTP {0}")]
    Http(u32),

    /// Transfer ended with fewer bytes than the segment's span (server
    /// closed early or ignored the range). Retryable; never written through
    /// to the final file.
    #[error("short read: expected {expected} bytes, got {received}")]
    ShortRead { expected: u64, received: u64 },

    /// Local write to the part file failed (disk full, permissions). Not
    /// retried.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

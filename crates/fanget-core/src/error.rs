//! Error taxonomy for a single download request.
//!
//! Every error is local to one `download` call: each call owns its working
//! directory, so a failure never corrupts shared state. The caller decides
//! whether to re-issue the whole operation.

use crate::retry::SegmentError;
use thiserror::Error;

/// Failure of the metadata probe, or a probe response that cannot drive a
/// segmented download (no length, no usable filename). Never retried.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The HEAD request itself failed (DNS, connect, TLS, timeout).
    #[error("probe request failed: {0}")]
    Transport(#[from] curl::Error),

    /// The probe got a non-2xx response.
    #[error("probe returned HTTP {0}")]
    Http(u32),

    /// The response did not advertise a `Content-Length`; range partitioning
    /// is impossible without it.
    #[error("response did not advertise a content length")]
    MissingContentLength,

    /// No usable filename in `Content-Disposition`. The downloader never
    /// invents one.
    #[error("response did not provide a usable Content-Disposition filename")]
    MissingFilename,
}

/// Terminal outcome of a failed `download` call.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Probe failed or the resource metadata is unusable.
    #[error("metadata: {0}")]
    Metadata(#[from] MetadataError),

    /// Caller/input error: malformed URL, zero part count, or a zero-length
    /// resource.
    #[error("invalid resource: {0}")]
    InvalidResource(String),

    /// A segment fetch failed (after any configured retries). Carries the
    /// index of the failing segment.
    #[error("segment {index}: {source}")]
    SegmentFetch {
        index: usize,
        #[source]
        source: SegmentError,
    },

    /// Local filesystem failure while creating the working directory or
    /// writing/reading artifacts. Fatal for the request.
    #[error("reassembly: {0}")]
    Reassembly(#[from] std::io::Error),
}

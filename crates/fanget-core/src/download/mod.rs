//! Single-shot download orchestration.
//!
//! One `DownloadRequest` produces exactly one terminal outcome: the request
//! walks `Probing → Partitioning → Fetching → Reassembling → Done`, or lands
//! in the terminal failed state from whichever phase broke. No state is
//! re-entered and there is no cross-invocation resume; a failed download is
//! re-issued from scratch.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::assemble;
use crate::config::FangetConfig;
use crate::error::{DownloadError, MetadataError};
use crate::fetcher;
use crate::filename;
use crate::probe;
use crate::retry::RetryPolicy;
use crate::segmenter::{self, Segment};
use crate::workdir::WorkDir;

/// Lifecycle phase of a download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Probing,
    Partitioning,
    Fetching,
    Reassembling,
    Done,
}

impl DownloadError {
    /// The phase this error arises in; the request is terminal there.
    pub fn phase(&self) -> Phase {
        match self {
            DownloadError::Metadata(_) => Phase::Probing,
            DownloadError::InvalidResource(_) => Phase::Partitioning,
            DownloadError::SegmentFetch { .. } => Phase::Fetching,
            DownloadError::Reassembly(_) => Phase::Reassembling,
        }
    }
}

/// Caller-tunable knobs for one request.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Requested segment count (>= 1). The plan may hold fewer segments for
    /// tiny resources or non-range servers; concurrency is capped separately
    /// by `max_workers`.
    pub parts: usize,
    /// Extra request headers forwarded to the probe and every segment GET.
    pub headers: HashMap<String, String>,
    /// Cap on concurrent segment workers.
    pub max_workers: usize,
    /// Per-segment retry policy; `None` disables retries.
    pub retry: Option<RetryPolicy>,
    /// Parent directory for the request's working directory.
    pub work_root: PathBuf,
    /// Connect timeout for each HTTP request.
    pub connect_timeout: Duration,
}

impl DownloadOptions {
    pub fn new(parts: usize) -> Self {
        Self {
            parts,
            headers: HashMap::new(),
            max_workers: 8,
            retry: Some(RetryPolicy::default()),
            work_root: std::env::temp_dir(),
            connect_timeout: Duration::from_secs(15),
        }
    }

    /// Options derived from the loaded config, with the config's default
    /// part count.
    pub fn from_config(cfg: &FangetConfig) -> Self {
        Self {
            parts: cfg.default_parts,
            headers: HashMap::new(),
            max_workers: cfg.max_workers,
            retry: Some(
                cfg.retry
                    .as_ref()
                    .map(|r| r.to_policy())
                    .unwrap_or_default(),
            ),
            work_root: cfg
                .work_root
                .clone()
                .unwrap_or_else(std::env::temp_dir),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        }
    }
}

/// Successful outcome: the working directory (now owned by the caller)
/// containing exactly one file, the reassembled resource.
#[derive(Debug)]
pub struct Downloaded {
    /// Working directory; the caller deletes it after consuming the file.
    pub dir: PathBuf,
    /// Filename of the reassembled file inside `dir`, per the probed
    /// `Content-Disposition`.
    pub filename: String,
    /// Total bytes written.
    pub len: u64,
}

impl Downloaded {
    /// Full path to the reassembled file.
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }
}

/// Downloads `url` as `opts.parts` concurrent range fetches and reassembles
/// the result in a fresh working directory.
///
/// All-or-nothing: on any failure the working directory is removed
/// best-effort and an error from the taxonomy is returned; a partial file is
/// never left behind looking like a success.
pub fn download(url: &str, opts: &DownloadOptions) -> Result<Downloaded, DownloadError> {
    validate(url, opts)?;

    tracing::debug!(phase = ?Phase::Probing, url, "probing resource metadata");
    let head = probe::probe(url, &opts.headers, opts.connect_timeout)?;
    let total = head
        .content_length
        .ok_or(MetadataError::MissingContentLength)?;
    let name = filename::filename_from_disposition(head.content_disposition.as_deref())
        .ok_or(MetadataError::MissingFilename)?;
    if total == 0 {
        return Err(DownloadError::InvalidResource(
            "resource has zero length".to_string(),
        ));
    }

    let parts = if opts.parts > 1 && !head.accept_ranges {
        tracing::warn!(url, "server does not advertise byte ranges; fetching as a single stream");
        1
    } else {
        opts.parts
    };

    tracing::debug!(phase = ?Phase::Partitioning, total, parts, "planning segments");
    let plan = segmenter::plan_segments(total, parts);

    let work = WorkDir::create(&opts.work_root)?;
    match fetch_and_assemble(url, opts, total, &name, &plan, &work) {
        Ok(len) => {
            tracing::debug!(phase = ?Phase::Done, filename = %name, len, "download complete");
            Ok(Downloaded {
                dir: work.into_path(),
                filename: name,
                len,
            })
        }
        Err(e) => {
            work.remove_best_effort();
            Err(e)
        }
    }
}

fn fetch_and_assemble(
    url: &str,
    opts: &DownloadOptions,
    total: u64,
    name: &str,
    plan: &[Segment],
    work: &WorkDir,
) -> Result<u64, DownloadError> {
    tracing::debug!(phase = ?Phase::Fetching, segments = plan.len(), "fetching segments");
    fetcher::fetch_all(
        url,
        &opts.headers,
        plan,
        total,
        &work.parts_dir(),
        opts.max_workers,
        opts.retry,
        opts.connect_timeout,
    )?;

    tracing::debug!(phase = ?Phase::Reassembling, "assembling artifacts");
    let len = assemble::assemble(&work.parts_dir(), plan.len(), &work.path().join(name), total)?;
    Ok(len)
}

fn validate(url: &str, opts: &DownloadOptions) -> Result<(), DownloadError> {
    if opts.parts == 0 {
        return Err(DownloadError::InvalidResource(
            "part count must be at least 1".to_string(),
        ));
    }
    let parsed = url::Url::parse(url)
        .map_err(|e| DownloadError::InvalidResource(format!("malformed URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DownloadError::InvalidResource(format!(
            "unsupported URL scheme: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_parts_is_rejected_before_any_io() {
        let mut opts = DownloadOptions::new(0);
        opts.work_root = PathBuf::from("/nonexistent/never-created");
        let err = download("http://example.invalid/file", &opts).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidResource(_)));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let opts = DownloadOptions::new(2);
        let err = download("not a url", &opts).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidResource(_)));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let opts = DownloadOptions::new(2);
        let err = download("ftp://example.com/file.iso", &opts).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidResource(_)));
    }

    #[test]
    fn errors_map_to_their_phase() {
        assert_eq!(
            DownloadError::Metadata(MetadataError::MissingContentLength).phase(),
            Phase::Probing
        );
        assert_eq!(
            DownloadError::InvalidResource("x".into()).phase(),
            Phase::Partitioning
        );
        assert_eq!(
            DownloadError::SegmentFetch {
                index: 3,
                source: crate::retry::SegmentError::Http(500),
            }
            .phase(),
            Phase::Fetching
        );
        assert_eq!(
            DownloadError::Reassembly(std::io::Error::new(std::io::ErrorKind::Other, "io"))
                .phase(),
            Phase::Reassembling
        );
    }

    #[test]
    fn options_pick_up_config() {
        let mut cfg = FangetConfig::default();
        cfg.default_parts = 6;
        cfg.max_workers = 3;
        cfg.retry = Some(crate::config::RetryConfig {
            max_attempts: 2,
            base_delay_ms: 10,
            max_delay_secs: 1,
        });
        let opts = DownloadOptions::from_config(&cfg);
        assert_eq!(opts.parts, 6);
        assert_eq!(opts.max_workers, 3);
        assert_eq!(opts.retry.unwrap().max_attempts, 2);
    }
}

//! Concurrent fetch dispatch.
//!
//! Fans the segment plan out over a bounded pool of worker threads; each
//! worker drains segments from a shared queue, performs the range GET into
//! that segment's part file, and reports over a channel. The dispatcher
//! joins every worker before returning: all segments succeed or the request
//! fails, never a partial result. The pool size is capped independently of
//! the caller-supplied part count.

mod segment;

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::DownloadError;
use crate::retry::{run_with_retry, RetryPolicy, SegmentError};
use crate::segmenter::Segment;
use crate::workdir::part_path;

/// Number of worker threads for a plan: at most `max_workers`, never more
/// than there are segments, never zero.
fn pool_size(max_workers: usize, segment_count: usize) -> usize {
    max_workers.max(1).min(segment_count)
}

/// Fetches every segment into `parts_dir`, retrying individual segments per
/// `retry_policy` when one is set. Segments that already succeeded are never
/// re-fetched; the queue hands each segment out exactly once and only the
/// failing attempt is repeated.
///
/// Blocks until all workers have finished. On failure returns the failing
/// segment with the lowest index.
#[allow(clippy::too_many_arguments)]
pub fn fetch_all(
    url: &str,
    custom_headers: &HashMap<String, String>,
    segments: &[Segment],
    total_len: u64,
    parts_dir: &Path,
    max_workers: usize,
    retry_policy: Option<RetryPolicy>,
    connect_timeout: Duration,
) -> Result<(), DownloadError> {
    if segments.is_empty() {
        return Ok(());
    }

    let queue: Arc<Mutex<VecDeque<Segment>>> =
        Arc::new(Mutex::new(segments.iter().copied().collect()));
    let (tx, rx) = mpsc::channel::<(usize, Result<(), SegmentError>)>();

    let workers = pool_size(max_workers, segments.len());
    tracing::debug!(segments = segments.len(), workers, "dispatching segment fetches");

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let queue = Arc::clone(&queue);
        let tx = tx.clone();
        let url = url.to_string();
        let headers = custom_headers.clone();
        let parts_dir = parts_dir.to_path_buf();
        handles.push(std::thread::spawn(move || loop {
            let seg = match queue.lock().unwrap().pop_front() {
                Some(s) => s,
                None => break,
            };
            let path = part_path(&parts_dir, seg.index);
            let fetch =
                || segment::fetch_one(&url, &headers, &seg, total_len, &path, connect_timeout);
            let result = match retry_policy {
                Some(policy) => run_with_retry(&policy, fetch),
                None => fetch(),
            };
            match &result {
                Ok(()) => tracing::debug!(index = seg.index, "segment complete"),
                Err(e) => tracing::debug!(index = seg.index, error = %e, "segment failed"),
            }
            if tx.send((seg.index, result)).is_err() {
                break;
            }
        }));
    }
    drop(tx);

    // Join semantics: the channel closes once every worker has exited, so
    // this drains exactly one result per segment.
    let mut results: Vec<(usize, Result<(), SegmentError>)> = rx.iter().collect();
    for handle in handles {
        handle
            .join()
            .unwrap_or_else(|e| panic!("segment worker panicked: {e:?}"));
    }

    results.sort_by_key(|(index, _)| *index);
    for (index, result) in results {
        if let Err(source) = result {
            return Err(DownloadError::SegmentFetch { index, source });
        }
    }
    Ok(())
}

//! Single-segment HTTP Range GET, written to the segment's part file.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::retry::SegmentError;
use crate::segmenter::Segment;

/// Fetches one segment's byte span into `part_path` and verifies the byte
/// count. The part file is written sequentially by this worker alone; the
/// reassembler is its only reader.
pub(super) fn fetch_one(
    url: &str,
    custom_headers: &HashMap<String, String>,
    segment: &Segment,
    total_len: u64,
    part_path: &Path,
    connect_timeout: Duration,
) -> Result<(), SegmentError> {
    let mut file = File::create(part_path)?;
    let mut written: u64 = 0;
    let mut write_error: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(connect_timeout)?;
    // Abort when throughput stays under 1 KiB/s for 60s instead of a
    // wall-clock limit a large segment on a slow link could never meet.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    // Hard stop for completely wedged transfers.
    easy.timeout(Duration::from_secs(3600))?;
    easy.range(&segment.range_value())?;

    let mut list = curl::easy::List::new();
    for (name, value) in custom_headers {
        list.append(&format!("{}: {}", name.trim(), value.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort the transfer
            }
        })?;
        transfer.perform()
    };
    if let Err(e) = perform_result {
        if e.is_write_error() {
            if let Some(io_err) = write_error.take() {
                return Err(SegmentError::Storage(io_err));
            }
        }
        return Err(SegmentError::Curl(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(SegmentError::Http(code));
    }

    let expected = segment.expected_len(total_len);
    if written != expected {
        return Err(SegmentError::ShortRead {
            expected,
            received: written,
        });
    }

    Ok(())
}

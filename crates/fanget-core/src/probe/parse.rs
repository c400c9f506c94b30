//! Parse collected response header lines into a ProbeResult.

use super::ProbeResult;

/// Builds a `ProbeResult` from raw header lines. Redirect chains deliver the
/// headers of every hop; later values win, so the final response decides.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeResult {
    let mut result = ProbeResult {
        content_length: None,
        accept_ranges: false,
        content_disposition: None,
    };

    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();

        if name.eq_ignore_ascii_case("content-length") {
            result.content_length = value.parse::<u64>().ok();
        } else if name.eq_ignore_ascii_case("accept-ranges") {
            result.accept_ranges = value.eq_ignore_ascii_case("bytes");
        } else if name.eq_ignore_ascii_case("content-disposition") {
            result.content_disposition = Some(value.to_string());
        }
    }

    result
}

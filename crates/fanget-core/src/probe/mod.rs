//! HTTP HEAD metadata probe.
//!
//! Fetches response headers only (no body) to learn the resource's total
//! length, whether the server honors byte ranges, and the raw
//! `Content-Disposition` value for filename derivation. Issues no range
//! requests itself.

mod parse;

use std::collections::HashMap;
use std::str;
use std::time::Duration;

use crate::error::MetadataError;

/// Headers the downloader needs from the probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Total size in bytes, if the server sent `Content-Length`.
    pub content_length: Option<u64>,
    /// True if the server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
    /// Raw `Content-Disposition` value, if present.
    pub content_disposition: Option<String>,
}

/// Performs a HEAD request and returns the parsed metadata.
///
/// Follows redirects; `custom_headers` are forwarded verbatim (e.g. an
/// `Authorization` header). Blocks the current thread on the network call.
pub fn probe(
    url: &str,
    custom_headers: &HashMap<String, String>,
    connect_timeout: Duration,
) -> Result<ProbeResult, MetadataError> {
    let mut header_lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(connect_timeout)?;
    easy.timeout(Duration::from_secs(30))?;

    let mut list = curl::easy::List::new();
    for (name, value) in custom_headers {
        list.append(&format!("{}: {}", name.trim(), value.trim()))?;
    }
    if !custom_headers.is_empty() {
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Ok(s) = str::from_utf8(line) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(MetadataError::Http(code));
    }

    Ok(parse::parse_headers(&header_lines))
}

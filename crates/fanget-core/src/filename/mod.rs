//! Filename derivation from response headers.
//!
//! The downloader only trusts `Content-Disposition`: if the header is absent
//! or yields nothing usable after sanitization, the request fails rather than
//! inventing a name. Extension splitting is provided for callers that rename
//! the file after taking ownership of it.

mod content_disposition;
mod sanitize;

pub use content_disposition::parse_content_disposition_filename;
pub use sanitize::sanitize_filename;

/// Derives the filename to save under from a raw `Content-Disposition`
/// value. Returns `None` when the header is missing or unusable; callers
/// must treat that as a hard failure.
pub fn filename_from_disposition(header: Option<&str>) -> Option<String> {
    let raw = header.and_then(parse_content_disposition_filename)?;
    let clean = sanitize_filename(&raw);
    if clean.is_empty() || clean == "." || clean == ".." {
        return None;
    }
    Some(clean)
}

/// Splits a filename into stem and extension, the extension keeping its
/// leading dot (`"archive.tar.gz"` → `("archive.tar", ".gz")`). A name with
/// no dot has an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => (stem, &name[stem.len()..]),
        _ => (name, ""),
    }
}

//! `fanget get <url>` – download, then deliver the file to the destination.
//!
//! The engine hands over a working directory containing the reassembled
//! file; this command consumes it: move the file into the destination
//! directory (collision-free), delete the working directory, report.

use anyhow::{bail, Context, Result};
use fanget_core::config::FangetConfig;
use fanget_core::download::{download, DownloadOptions};
use fanget_core::filename::split_extension;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub fn run_get(
    cfg: &FangetConfig,
    url: &str,
    parts: Option<usize>,
    dest: Option<PathBuf>,
    headers: &[String],
    json: bool,
) -> Result<()> {
    let mut opts = DownloadOptions::from_config(cfg);
    if let Some(parts) = parts {
        opts.parts = parts;
    }
    opts.headers = parse_header_args(headers)?;

    let dest_dir = match dest {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    fs::create_dir_all(&dest_dir)
        .with_context(|| format!("cannot create destination {}", dest_dir.display()))?;

    let result = download(url, &opts)?;

    let target = unique_dest_path(&dest_dir, &result.filename);
    move_file(&result.file_path(), &target)
        .with_context(|| format!("failed to move download to {}", target.display()))?;
    if let Err(e) = fs::remove_dir_all(&result.dir) {
        tracing::warn!(dir = %result.dir.display(), error = %e, "could not remove working directory");
    }

    if json {
        let summary = serde_json::json!({
            "filename": target.file_name().map(|n| n.to_string_lossy().into_owned()),
            "size": result.len,
            "path": target.display().to_string(),
        });
        println!("{summary}");
    } else {
        println!("Saved {} ({} bytes)", target.display(), result.len);
    }
    Ok(())
}

/// Parses repeated `-H "Name: value"` arguments.
fn parse_header_args(args: &[String]) -> Result<HashMap<String, String>> {
    let mut headers = HashMap::new();
    for arg in args {
        let Some((name, value)) = arg.split_once(':') else {
            bail!("malformed header {arg:?}; expected \"Name: value\"");
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("malformed header {arg:?}; empty header name");
        }
        headers.insert(name.to_string(), value.trim().to_string());
    }
    Ok(headers)
}

/// First free path for `filename` in `dir`, suffixing the stem with `-1`,
/// `-2`, ... on collision.
fn unique_dest_path(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = split_extension(filename);
    let mut n = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}-{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Rename, falling back to copy+remove when the destination is on another
/// filesystem.
fn move_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
    }
}

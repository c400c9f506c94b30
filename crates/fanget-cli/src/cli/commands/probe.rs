//! `fanget probe <url>` – print a resource's metadata without downloading.

use anyhow::Result;
use fanget_core::config::FangetConfig;
use fanget_core::filename::filename_from_disposition;
use fanget_core::probe;
use std::collections::HashMap;
use std::time::Duration;

pub fn run_probe(cfg: &FangetConfig, url: &str, json: bool) -> Result<()> {
    let meta = probe::probe(
        url,
        &HashMap::new(),
        Duration::from_secs(cfg.connect_timeout_secs),
    )?;
    let filename = filename_from_disposition(meta.content_disposition.as_deref());

    if json {
        let summary = serde_json::json!({
            "content_length": meta.content_length,
            "accept_ranges": meta.accept_ranges,
            "filename": filename,
        });
        println!("{summary}");
    } else {
        match meta.content_length {
            Some(len) => println!("length:        {len} bytes"),
            None => println!("length:        unknown"),
        }
        println!("range support: {}", if meta.accept_ranges { "yes" } else { "no" });
        match filename {
            Some(name) => println!("filename:      {name}"),
            None => println!("filename:      none (download would fail)"),
        }
    }
    Ok(())
}

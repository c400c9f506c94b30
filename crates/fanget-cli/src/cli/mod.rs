//! CLI for the fanget parallel downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fanget_core::config;
use std::path::PathBuf;

use commands::{run_get, run_probe};

/// Top-level CLI for fanget.
#[derive(Debug, Parser)]
#[command(name = "fanget")]
#[command(about = "fanget: chunked parallel file downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL as parallel range fetches and save the file locally.
    Get {
        /// Direct HTTP/HTTPS URL to download.
        url: String,

        /// Number of parts to split the download into (default from config).
        #[arg(long, value_name = "N")]
        parts: Option<usize>,

        /// Directory to place the finished file in (default: current dir).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Extra request header as "Name: value". Repeatable.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Print a JSON description of the result instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Probe a URL's metadata (size, range support, filename) without
    /// downloading the body.
    Probe {
        /// Direct HTTP/HTTPS URL to probe.
        url: String,

        /// Print the metadata as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Get {
                url,
                parts,
                dest,
                headers,
                json,
            } => run_get(&cfg, &url, parts, dest, &headers, json),
            CliCommand::Probe { url, json } => run_probe(&cfg, &url, json),
        }
    }
}

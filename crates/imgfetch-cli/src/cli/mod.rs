//! CLI for the imgfetch image downloader.

use anyhow::Result;
use clap::Parser;
use imgfetch_core::config::{self, FetcherConfig};
use imgfetch_core::fetcher::Fetcher;
use imgfetch_core::report::ReportFormat;
use imgfetch_core::run::{run_with_messages, RunOptions};
use std::io;
use std::path::PathBuf;

/// Download images from URLs typed on standard input.
///
/// Enter URLs separated by commas or newlines, then a line containing the
/// terminator (default `done`). Each URL is fetched once, in order; files
/// that already exist are never overwritten.
#[derive(Debug, Parser)]
#[command(name = "imgfetch", version)]
#[command(about = "Fetch images from the web into a local folder", long_about = None)]
pub struct Cli {
    /// Destination folder (default from config, else `Fetched_Images`).
    #[arg(short, long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Per-request timeout in seconds (at least 1).
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Read configuration from this file instead of `~/.config/imgfetch/config.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print one JSON object per URL instead of status lines; banners go to stderr.
    #[arg(long)]
    pub json: bool,

    /// Do not print banners or prompts.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.resolve_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let fetcher = Fetcher::new(&cfg);
        let opts = cli.run_options(&cfg);

        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();
        let summary = run_with_messages(stdin.lock(), &mut stdout, &mut stderr, &fetcher, &opts)?;
        tracing::debug!(
            dest = %fetcher.dest_folder().display(),
            saved = summary.saved,
            "finished"
        );
        Ok(())
    }

    fn resolve_config(&self) -> Result<FetcherConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init().unwrap_or_else(|e| {
                tracing::warn!("using built-in defaults, config unavailable: {:#}", e);
                FetcherConfig::default()
            }),
        };
        let cfg = self.apply_overrides(cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Command-line flags win over config file values.
    pub fn apply_overrides(&self, mut cfg: FetcherConfig) -> FetcherConfig {
        if let Some(dest) = &self.dest {
            cfg.dest_folder = dest.clone();
        }
        if let Some(timeout) = self.timeout {
            cfg.timeout_secs = timeout;
        }
        cfg
    }

    pub fn run_options(&self, cfg: &FetcherConfig) -> RunOptions {
        RunOptions {
            format: if self.json {
                ReportFormat::Json
            } else {
                ReportFormat::Human
            },
            quiet: self.quiet,
            terminator: cfg.terminator.clone(),
        }
    }
}

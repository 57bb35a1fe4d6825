//! Interactive run: banner, URL entry, sequential downloads, summary.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::config::DEFAULT_TERMINATOR;
use crate::fetcher::{Fetcher, Outcome};
use crate::input;
use crate::report::{self, ReportFormat, RunSummary};

/// Presentation options for [`run`].
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub format: ReportFormat,
    /// Suppress banners and prompts; per-URL reports are still written.
    pub quiet: bool,
    /// Terminator line for URL entry.
    pub terminator: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Human,
            quiet: false,
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }
}

/// Anything that turns a URL into an [`Outcome`].
pub trait Fetch {
    fn fetch(&self, url: &str) -> Outcome;
}

impl Fetch for Fetcher {
    fn fetch(&self, url: &str) -> Outcome {
        Fetcher::fetch(self, url)
    }
}

/// Collects URLs from `input`, then fetches each in order, reporting to `out`.
///
/// Per-URL failures are reported and counted, never returned. Only I/O
/// errors on `input` or `out` end the run early. In JSON mode banners and
/// the closing summary are dropped; see [`run_with_messages`] to keep them.
pub fn run<R, W, F>(input: R, out: &mut W, fetcher: &F, opts: &RunOptions) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    F: Fetch + ?Sized,
{
    run_with_messages(input, out, &mut io::sink(), fetcher, opts)
}

/// Like [`run`], but in JSON mode banners, prompts and the closing summary
/// are written to `messages` (usually stderr) so `out` holds only records.
pub fn run_with_messages<R, W, M, F>(
    input: R,
    out: &mut W,
    messages: &mut M,
    fetcher: &F,
    opts: &RunOptions,
) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    M: Write,
    F: Fetch + ?Sized,
{
    let chatty = !opts.quiet;
    let json = opts.format == ReportFormat::Json;

    if chatty {
        let m = message_sink(out, messages, json);
        writeln!(m, "Welcome to the Image Fetcher")?;
        writeln!(m, "A tool for mindfully collecting images from the web")?;
        writeln!(m)?;
        writeln!(m, "Enter image URLs (separate by comma or newline).")?;
        writeln!(
            m,
            "Type '{}' on a new line when you're finished:",
            opts.terminator
        )?;
        writeln!(m)?;
        m.flush()?;
    }

    let urls = input::collect_urls(input, &opts.terminator).context("failed to read URLs")?;

    if chatty {
        let m = message_sink(out, messages, json);
        writeln!(m)?;
        writeln!(m, "Starting download of {} URL(s)...", urls.len())?;
        writeln!(m)?;
        m.flush()?;
    }

    let mut summary = RunSummary::default();
    for url in &urls {
        let span = tracing::info_span!("fetch", %url);
        let _guard = span.enter();

        let outcome = fetcher.fetch(url);
        report::log_outcome(url, &outcome);
        summary.record(outcome.status());
        report::write_outcome(out, opts.format, url, &outcome)?;
        out.flush()?;
    }

    if chatty {
        let m = message_sink(out, messages, json);
        writeln!(m)?;
        summary.write_human(m)?;
        writeln!(m, "Connection strengthened. Community enriched.")?;
        m.flush()?;
    }
    tracing::info!(?summary, "run complete");

    Ok(summary)
}

/// Human output shares `out`; JSON output keeps it for records only.
fn message_sink<'a>(
    out: &'a mut dyn Write,
    messages: &'a mut dyn Write,
    json: bool,
) -> &'a mut dyn Write {
    if json {
        messages
    } else {
        out
    }
}

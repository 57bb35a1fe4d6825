//! Per-URL status lines, JSON records, and the end-of-run summary.

use serde::Serialize;
use std::io::{self, Write};

use crate::fetcher::{Outcome, OutcomeStatus};

/// How outcomes are written to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Status lines for people.
    #[default]
    Human,
    /// One JSON object per URL, newline-delimited.
    Json,
}

/// Machine-readable form of one [`Outcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeRecord<'a> {
    pub url: &'a str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<'a> OutcomeRecord<'a> {
    pub fn new(url: &'a str, outcome: &'a Outcome) -> Self {
        let mut record = OutcomeRecord {
            url,
            status: outcome.status().as_str(),
            filename: None,
            path: None,
            bytes: None,
            detail: None,
        };
        match outcome {
            Outcome::Saved {
                filename,
                path,
                bytes,
            } => {
                record.filename = Some(filename.as_str());
                record.path = Some(path.display().to_string());
                record.bytes = Some(*bytes);
            }
            Outcome::SkippedNotImage { content_type } => {
                record.detail = Some(match content_type {
                    Some(ct) => format!("content type {}", ct),
                    None => "no content type".to_string(),
                });
            }
            Outcome::SkippedDuplicate { filename, path } => {
                record.filename = Some(filename.as_str());
                record.path = Some(path.display().to_string());
            }
            Outcome::NetworkError(e) => record.detail = Some(e.to_string()),
            Outcome::OtherError(e) => record.detail = Some(format!("{:#}", e)),
        }
        record
    }
}

/// Writes the report for one URL in the given format.
pub fn write_outcome<W: Write>(
    out: &mut W,
    format: ReportFormat,
    url: &str,
    outcome: &Outcome,
) -> io::Result<()> {
    match format {
        ReportFormat::Human => write_human(out, url, outcome),
        ReportFormat::Json => {
            serde_json::to_writer(&mut *out, &OutcomeRecord::new(url, outcome))?;
            writeln!(out)
        }
    }
}

fn write_human<W: Write>(out: &mut W, url: &str, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Saved { filename, path, .. } => {
            writeln!(out, "✓ Successfully fetched: {}", filename)?;
            writeln!(out, "✓ Image saved to {}", path.display())
        }
        Outcome::SkippedNotImage { .. } => writeln!(out, "✗ Skipped: {} (not an image)", url),
        Outcome::SkippedDuplicate { filename, .. } => {
            writeln!(out, "✓ Skipped: {} (already downloaded)", filename)
        }
        Outcome::NetworkError(e) => writeln!(out, "✗ Connection error for {}: {}", url, e),
        Outcome::OtherError(e) => writeln!(out, "✗ Error fetching {}: {:#}", url, e),
    }
}

/// Emits one structured event for an outcome.
pub fn log_outcome(url: &str, outcome: &Outcome) {
    let status = outcome.status().as_str();
    match outcome {
        Outcome::Saved { path, bytes, .. } => {
            tracing::info!(%url, status, path = %path.display(), bytes, "image saved")
        }
        Outcome::SkippedNotImage { content_type } => tracing::info!(
            %url,
            status,
            content_type = content_type.as_deref().unwrap_or("-"),
            "skipped"
        ),
        Outcome::SkippedDuplicate { path, .. } => {
            tracing::info!(%url, status, path = %path.display(), "skipped")
        }
        Outcome::NetworkError(e) => tracing::warn!(%url, status, error = %e, "request failed"),
        Outcome::OtherError(e) => tracing::error!(%url, status, error = %format!("{:#}", e), "failed"),
    }
}

/// Per-category counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub saved: usize,
    pub skipped_not_image: usize,
    pub skipped_duplicate: usize,
    pub network_errors: usize,
    pub other_errors: usize,
}

impl RunSummary {
    pub fn record(&mut self, status: OutcomeStatus) {
        match status {
            OutcomeStatus::Saved => self.saved += 1,
            OutcomeStatus::SkippedNotImage => self.skipped_not_image += 1,
            OutcomeStatus::SkippedDuplicate => self.skipped_duplicate += 1,
            OutcomeStatus::NetworkError => self.network_errors += 1,
            OutcomeStatus::OtherError => self.other_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved
            + self.skipped_not_image
            + self.skipped_duplicate
            + self.network_errors
            + self.other_errors
    }

    pub fn write_human<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Processed {} URL(s): {} saved, {} already downloaded, {} not images, {} failed",
            self.total(),
            self.saved,
            self.skipped_duplicate,
            self.skipped_not_image,
            self.network_errors + self.other_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::FetchError;
    use std::path::PathBuf;

    fn render(format: ReportFormat, url: &str, outcome: &Outcome) -> String {
        let mut buf = Vec::new();
        write_outcome(&mut buf, format, url, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn saved() -> Outcome {
        Outcome::Saved {
            filename: "cat.png".to_string(),
            path: PathBuf::from("Fetched_Images/cat.png"),
            bytes: 42,
        }
    }

    #[test]
    fn human_lines_per_category() {
        let url = "https://example.com/cat.png";
        let s = render(ReportFormat::Human, url, &saved());
        assert!(s.contains("Successfully fetched: cat.png"));
        assert!(s.contains("Image saved to Fetched_Images/cat.png"));

        let s = render(
            ReportFormat::Human,
            url,
            &Outcome::SkippedNotImage {
                content_type: Some("text/html".into()),
            },
        );
        assert!(s.contains("not an image"));

        let s = render(
            ReportFormat::Human,
            url,
            &Outcome::SkippedDuplicate {
                filename: "cat.png".into(),
                path: PathBuf::from("Fetched_Images/cat.png"),
            },
        );
        assert!(s.contains("already downloaded"));

        let s = render(ReportFormat::Human, url, &Outcome::NetworkError(FetchError::Status(404)));
        assert!(s.contains("Connection error"));
        assert!(s.contains("HTTP 404"));

        let s = render(
            ReportFormat::Human,
            url,
            &Outcome::OtherError(anyhow::anyhow!("permission denied")),
        );
        assert!(s.contains("Error fetching"));
        assert!(s.contains("permission denied"));
    }

    #[test]
    fn json_record_saved() {
        let s = render(ReportFormat::Json, "https://example.com/cat.png", &saved());
        assert!(s.ends_with('\n'));
        let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
        assert_eq!(v["status"], "saved");
        assert_eq!(v["url"], "https://example.com/cat.png");
        assert_eq!(v["filename"], "cat.png");
        assert_eq!(v["bytes"], 42);
        assert!(v.get("detail").is_none());
    }

    #[test]
    fn json_record_network_error() {
        let s = render(
            ReportFormat::Json,
            "https://example.com/x.png",
            &Outcome::NetworkError(FetchError::Status(500)),
        );
        let v: serde_json::Value = serde_json::from_str(s.trim()).unwrap();
        assert_eq!(v["status"], "network_error");
        assert_eq!(v["detail"], "HTTP 500");
        assert!(v.get("filename").is_none());
    }

    #[test]
    fn summary_counts() {
        let mut summary = RunSummary::default();
        summary.record(OutcomeStatus::Saved);
        summary.record(OutcomeStatus::Saved);
        summary.record(OutcomeStatus::SkippedDuplicate);
        summary.record(OutcomeStatus::NetworkError);
        summary.record(OutcomeStatus::OtherError);
        assert_eq!(summary.saved, 2);
        assert_eq!(summary.total(), 5);

        let mut buf = Vec::new();
        summary.write_human(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("Processed 5 URL(s): 2 saved, 1 already downloaded, 0 not images, 2 failed"));
    }
}

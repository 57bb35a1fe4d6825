//! Per-URL fetch, validate, and save.
//!
//! Every failure is folded into an [`Outcome`]; nothing here aborts a run.

use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::FetcherConfig;
use crate::http::{self, FetchError, HttpOptions, HttpResponse};
use crate::url_model::derive_filename;

/// Result of processing one URL.
#[derive(Debug)]
pub enum Outcome {
    /// Image written to `path`.
    Saved {
        filename: String,
        path: PathBuf,
        bytes: u64,
    },
    /// Response `Content-Type` was absent or not `image/*`. Nothing written.
    SkippedNotImage { content_type: Option<String> },
    /// A file with the derived name already exists; it was left untouched.
    SkippedDuplicate { filename: String, path: PathBuf },
    /// Request failed, timed out, or returned a non-2xx status.
    NetworkError(FetchError),
    /// Anything else (filesystem errors and the like).
    OtherError(anyhow::Error),
}

/// Stable category of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeStatus {
    Saved,
    SkippedNotImage,
    SkippedDuplicate,
    NetworkError,
    OtherError,
}

impl OutcomeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Saved => "saved",
            OutcomeStatus::SkippedNotImage => "skipped_not_image",
            OutcomeStatus::SkippedDuplicate => "skipped_duplicate",
            OutcomeStatus::NetworkError => "network_error",
            OutcomeStatus::OtherError => "other_error",
        }
    }
}

impl Outcome {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Outcome::Saved { .. } => OutcomeStatus::Saved,
            Outcome::SkippedNotImage { .. } => OutcomeStatus::SkippedNotImage,
            Outcome::SkippedDuplicate { .. } => OutcomeStatus::SkippedDuplicate,
            Outcome::NetworkError(_) => OutcomeStatus::NetworkError,
            Outcome::OtherError(_) => OutcomeStatus::OtherError,
        }
    }
}

/// True if a `Content-Type` value declares an image (`image/...`).
///
/// Only the declared header is checked; the payload bytes are not sniffed.
// Case-insensitive and tolerant of leading whitespace, so `Image/PNG` counts.
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(str::trim_start)
        .and_then(|ct| ct.get(..6))
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case("image/"))
}

/// Downloads URLs into the configured destination folder.
#[derive(Debug, Clone)]
pub struct Fetcher {
    dest_folder: PathBuf,
    fallback_filename: String,
    http: HttpOptions,
}

impl Fetcher {
    pub fn new(cfg: &FetcherConfig) -> Self {
        Self {
            dest_folder: cfg.dest_folder.clone(),
            fallback_filename: cfg.fallback_filename.clone(),
            http: HttpOptions::from_config(cfg),
        }
    }

    pub fn dest_folder(&self) -> &Path {
        &self.dest_folder
    }

    /// Fetches `url` and saves it if it is a new image.
    pub fn fetch(&self, url: &str) -> Outcome {
        if let Err(e) = fs::create_dir_all(&self.dest_folder) {
            return Outcome::OtherError(anyhow::Error::new(e).context(format!(
                "failed to create destination folder {}",
                self.dest_folder.display()
            )));
        }

        let response = match http::get(url, &self.http) {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(%url, timeout = ?self.http.timeout, "request timed out");
                }
                return Outcome::NetworkError(e);
            }
        };

        store(url, &response, &self.dest_folder, &self.fallback_filename)
    }
}

/// Validates a fetched response and writes it under `dest_folder`.
///
/// Never overwrites: an existing file with the derived name wins.
pub fn store(url: &str, response: &HttpResponse, dest_folder: &Path, fallback: &str) -> Outcome {
    if !is_image_content_type(response.content_type.as_deref()) {
        return Outcome::SkippedNotImage {
            content_type: response.content_type.clone(),
        };
    }

    let filename = derive_filename(url, fallback);
    let path = dest_folder.join(&filename);

    if path.exists() {
        return Outcome::SkippedDuplicate { filename, path };
    }

    match write_new_file(&path, &response.body) {
        Ok(()) => Outcome::Saved {
            filename,
            bytes: response.body.len() as u64,
            path,
        },
        Err(e) if is_already_exists(&e) => Outcome::SkippedDuplicate { filename, path },
        Err(e) => Outcome::OtherError(e),
    }
}

fn is_already_exists(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .map_or(false, |err| err.kind() == io::ErrorKind::AlreadyExists)
}

/// Creates `path` (failing if it exists) and writes `data`. A failed write
/// removes the partial file.
fn write_new_file(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let mut file: File = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let written = file
        .write_all(data)
        .and_then(|()| file.sync_all())
        .with_context(|| format!("failed to write {}", path.display()));
    if written.is_err() {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial file");
        }
    }
    written
}

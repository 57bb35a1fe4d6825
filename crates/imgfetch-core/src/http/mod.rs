//! Blocking HTTP GET for a single image URL.
//!
//! Uses the curl crate (libcurl). The whole body is buffered in memory and
//! only the headers of the final response (after redirects) are kept.

mod error;
mod parse;

pub use error::FetchError;

use std::str;
use std::time::Duration;

/// Shortest timeout ever passed to libcurl.
pub const MIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Options applied to every GET.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Total time allowed for the request, connect included.
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: u32,
}

impl HttpOptions {
    pub fn from_config(cfg: &crate::config::FetcherConfig) -> Self {
        Self {
            // Zero would disable the libcurl timeout entirely.
            timeout: cfg.timeout().max(MIN_TIMEOUT),
            user_agent: cfg.user_agent.clone(),
            max_redirects: cfg.max_redirects,
        }
    }
}

/// A completed 2xx response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// `Content-Type` value if present.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs a GET request and returns the buffered response.
///
/// Transport failures (DNS, connect, timeout) and non-2xx statuses are errors.
/// Runs in the current thread.
pub fn get(url: &str, opts: &HttpOptions) -> Result<HttpResponse, FetchError> {
    let mut headers: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirects)?;
    easy.timeout(opts.timeout)?;
    easy.useragent(&opts.user_agent)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                // Each redirect hop starts a new header block.
                if line.starts_with("HTTP/") {
                    headers.clear();
                }
                headers.push(line.to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Status(status));
    }

    let content_type = parse::content_type(&headers);
    tracing::debug!(
        %url,
        status,
        content_type = content_type.as_deref().unwrap_or("-"),
        bytes = body.len(),
        "GET complete"
    );

    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}

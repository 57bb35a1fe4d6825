//! Network-step error type.

use thiserror::Error;

/// Failure of the GET itself. Always scoped to one URL.
#[derive(Debug, Error)]
pub enum FetchError {
    /// libcurl rejected the URL before any request was sent.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Connection, DNS, TLS, or timeout failure.
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Transport(e) if e.is_operation_timedout())
    }

    /// HTTP status code, if the server answered with a non-2xx status.
    pub fn status(&self) -> Option<u32> {
        match self {
            FetchError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

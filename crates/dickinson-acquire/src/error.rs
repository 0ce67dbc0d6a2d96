use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcquireError>;

/// Unrecoverable failures while acquiring or writing the catalog.
///
/// A detail page that loads but has no poem container is not an error;
/// extraction reports that case as `Ok(None)`.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to serialize catalog")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AcquireError {
    /// True for errors raised while talking to a remote server.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            AcquireError::Request { .. } | AcquireError::Status { .. } | AcquireError::Body { .. }
        )
    }
}

use thiserror::Error;

/// Failure to retrieve the base page. Fatal for a run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP Error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Failure of a single media link. Recorded, never propagated.
#[derive(Error, Debug)]
pub enum LinkCheckError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP Error {status}: {reason}")]
    Status { status: u16, reason: String },
}

impl LinkCheckError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LinkCheckError::Request(e) => e.status().map(|s| s.as_u16()),
            LinkCheckError::Status { status, .. } => Some(*status),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

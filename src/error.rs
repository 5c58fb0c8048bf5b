use thiserror::Error;

/// Failure to obtain a zone list from the data source
///
/// Every variant is treated the same way by the refresh cycle: log it, keep
/// the last good rows, and wait for the next tick.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, TLS)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Data source answered with a non-2xx status
    #[error("data source returned HTTP {status}")]
    Status { status: reqwest::StatusCode },
    /// Response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
    /// Body is not JSON or has no `zones` array
    #[error("malformed zone list: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Short machine-friendly name, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Request { .. } => "request",
            Self::Status { .. } => "status",
            Self::Body(_) => "body",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

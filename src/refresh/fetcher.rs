//! Zone list fetcher
//!
//! `ZoneSource` is the seam between the refresh cycle and the data source;
//! `HttpZoneSource` is the production implementation issuing one GET to a
//! fixed endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::FetchError;
use crate::pricing::models::{ZoneRecord, ZonesResponse};

/// Anything that can produce the current zone list
#[async_trait]
pub trait ZoneSource: Send + Sync {
    async fn fetch_zones(&self) -> Result<Vec<ZoneRecord>, FetchError>;

    /// Human-readable location, shown in the dashboard header
    fn describe(&self) -> String;
}

/// HTTP client wrapper for the zone endpoint
pub struct HttpZoneSource {
    client: Client,
    url: String,
}

impl HttpZoneSource {
    /// Create a fetcher for `url` with a per-request timeout
    pub fn new(url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        Ok(Self { client, url })
    }

    pub fn from_config(cfg: &SourceConfig) -> Result<Self, FetchError> {
        Self::new(cfg.url.clone(), cfg.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ZoneSource for HttpZoneSource {
    /// Fetch and decode the zone list
    ///
    /// # Errors
    /// Returns an error if:
    /// - Network request fails
    /// - Response status is not successful (2xx)
    /// - Body is not JSON or has no `zones` array
    async fn fetch_zones(&self) -> Result<Vec<ZoneRecord>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: self.url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
            });
        }

        let body = response.text().await.map_err(FetchError::Body)?;
        debug!("Fetched {} bytes of zone data", body.len());

        parse_zones(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Decode a zone list body
pub fn parse_zones(body: &str) -> Result<Vec<ZoneRecord>, FetchError> {
    let response: ZonesResponse = serde_json::from_str(body)?;
    Ok(response.into_records())
}

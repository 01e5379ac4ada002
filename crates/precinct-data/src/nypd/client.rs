//! HTTP client for the NYC Open Data CSV export.

use crate::error::{DataError, Result};
use crate::table::IncidentTable;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// CSV export of the NYPD Shooting Incident Data (Historic) dataset.
pub const DEFAULT_SOURCE_URL: &str =
    "https://data.cityofnewyork.us/api/views/833y-fsy8/rows.csv?accessType=DOWNLOAD";

/// Default request timeout. The full export is tens of megabytes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("precinct/", env!("CARGO_PKG_VERSION"));

/// Configuration for fetching the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL of the CSV export.
    pub url: String,
    /// Upper bound on the whole request, in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Client that downloads and parses the shooting incident export.
#[derive(Debug, Clone)]
pub struct NypdClient {
    client: reqwest::Client,
    url: String,
}

impl NypdClient {
    /// Create a client for the default dataset URL.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a client with a custom URL and timeout.
    pub fn with_config(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// The URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download the raw CSV body.
    pub async fn fetch_csv(&self) -> Result<String> {
        info!(url = %self.url, "fetching incident export");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "download complete");
        Ok(body)
    }

    /// Download and parse the export into an [`IncidentTable`].
    pub async fn fetch_table(&self) -> Result<IncidentTable> {
        let body = self.fetch_csv().await?;
        IncidentTable::from_reader(body.as_bytes())
    }
}

use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Environment variable {0} is not set; it must hold the NOAA CDO API token")]
    MissingApiKey(&'static str),

    #[error("Month {0} is not a calendar month (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("CDO API returned status {status} for {query}")]
    HttpStatus { query: String, status: u16 },

    #[error("CDO API returned an empty response body for {0}")]
    EmptyBody(String),

    #[error("CDO API returned a malformed response for {query}")]
    MalformedResponse {
        query: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to average observations by date")]
    Aggregation(#[from] PolarsError),

    #[error("Unparseable observation date '{0}' in CDO API response")]
    InvalidDate(String),

    #[error("Failed to create results directory '{0}'")]
    ResultsDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to write series file '{0}'")]
    SeriesWrite(PathBuf, #[source] PolarsError),

    #[error("I/O error writing series file '{0}'")]
    SeriesWriteIo(PathBuf, #[source] std::io::Error),
}

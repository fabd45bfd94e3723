//! Settings for talking to the NOAA Climate Data Online (CDO) v2 API.

use crate::collector::error::CollectError;
use bon::Builder;
use std::fmt;

/// Environment variable holding the CDO API token.
pub const API_KEY_ENV: &str = "NOAA_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://www.ncdc.noaa.gov/cdo-web/api/v2/data";
/// Global Summary of Month: monthly averages per station.
pub const DEFAULT_DATASET: &str = "GSOM";
/// Largest page the CDO API will serve.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
/// Without an explicit unit system the API mixes Celsius and Fahrenheit.
pub const DEFAULT_UNITS: &str = "metric";

/// The CDO API token, sent in the `token` request header.
///
/// `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Reads the token from `NOAA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::MissingApiKey`] if the variable is unset or blank.
    /// Callers check this before building any client, so a missing credential
    /// never reaches the network.
    pub fn from_env() -> Result<Self, CollectError> {
        Self::from_value(std::env::var(API_KEY_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Result<Self, CollectError> {
        match value {
            Some(token) if !token.trim().is_empty() => Ok(Self(token.trim().to_string())),
            _ => Err(CollectError::MissingApiKey(API_KEY_ENV)),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Query settings shared by every page request.
///
/// # Examples
///
/// ```
/// use county_climate::CollectorConfig;
///
/// let config = CollectorConfig::builder().page_size(500).build();
/// assert_eq!(config.page_size, 500);
/// assert_eq!(config.dataset_id, "GSOM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct CollectorConfig {
    #[builder(into, default = DEFAULT_ENDPOINT.to_string())]
    pub endpoint: String,
    #[builder(into, default = DEFAULT_DATASET.to_string())]
    pub dataset_id: String,
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    #[builder(into, default = DEFAULT_UNITS.to_string())]
    pub units: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

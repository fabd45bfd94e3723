//! Wire types and transport for the NOAA CDO v2 `data` endpoint.
//!
//! API documentation: https://www.ncdc.noaa.gov/cdo-web/webservices/v2#data
//!
//! The transport is a trait so the pagination logic in [`crate::collector::fetch`]
//! can run against a scripted stand-in; [`HttpTransport`] is the real thing.

use crate::collector::config::{ApiToken, CollectorConfig};
use crate::collector::error::CollectError;
use crate::types::county::fips_location_id;
use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

const TOKEN_HEADER: &str = "token";

// ============================================================================
// Requests
// ============================================================================

/// The query parameters of one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub dataset_id: String,
    /// `FIPS:<code>`, see [`fips_location_id`].
    pub location_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub limit: u32,
    /// 1-based record offset.
    pub offset: u32,
    pub units: String,
}

impl PageQuery {
    /// First page of a single-month query: start and end date are both the
    /// first day of `month` in `year`, which restricts the results to that
    /// month's summary records.
    pub fn first_page(config: &CollectorConfig, place: u32, date: NaiveDate) -> Self {
        Self {
            dataset_id: config.dataset_id.clone(),
            location_id: fips_location_id(place),
            start_date: date,
            end_date: date,
            limit: config.page_size,
            offset: 1,
            units: config.units.clone(),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("datasetid", self.dataset_id.clone()),
            ("locationid", self.location_id.clone()),
            ("startdate", self.start_date.format("%Y-%m-%d").to_string()),
            ("enddate", self.end_date.format("%Y-%m-%d").to_string()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("units", self.units.clone()),
        ]
    }
}

impl fmt::Display for PageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} offset {}",
            self.dataset_id, self.location_id, self.start_date, self.offset
        )
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Raw status and body of a page response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdoPage {
    pub metadata: CdoMetadata,
    #[serde(default)]
    pub results: Vec<CdoRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CdoMetadata {
    pub resultset: ResultSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    /// Total number of records matching the query, across all pages.
    pub count: u32,
}

/// One station-level record. The `station` and `attributes` fields of the
/// wire format are not needed and are dropped during deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct CdoRecord {
    pub date: String,
    pub datatype: String,
    pub value: f64,
}

/// Interprets a raw response.
///
/// # Errors
///
/// * [`CollectError::HttpStatus`] for any non-2xx status.
/// * [`CollectError::EmptyBody`] for a blank body or an empty JSON object,
///   which is what the API sends when it is overloaded (and for queries
///   without results).
/// * [`CollectError::MalformedResponse`] if the body is not a CDO page.
pub fn parse_page(query: &PageQuery, response: TransportResponse) -> Result<CdoPage, CollectError> {
    if !(200..300).contains(&response.status) {
        return Err(CollectError::HttpStatus {
            query: query.to_string(),
            status: response.status,
        });
    }
    if response.body.trim().is_empty() {
        return Err(CollectError::EmptyBody(query.to_string()));
    }

    let malformed = |source| CollectError::MalformedResponse {
        query: query.to_string(),
        source,
    };
    let value: Value = serde_json::from_str(&response.body).map_err(malformed)?;
    let is_empty = match &value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    };
    if is_empty {
        return Err(CollectError::EmptyBody(query.to_string()));
    }
    serde_json::from_value(value).map_err(malformed)
}

// ============================================================================
// Transport
// ============================================================================

/// Issues a single page request and hands back the raw response.
pub trait CdoTransport {
    fn get(&self, query: &PageQuery) -> Result<TransportResponse, CollectError>;
}

impl<T: CdoTransport + ?Sized> CdoTransport for &T {
    fn get(&self, query: &PageQuery) -> Result<TransportResponse, CollectError> {
        (**self).get(query)
    }
}

/// Blocking HTTP transport against the live CDO API.
///
/// The client's default 30 second timeout is switched off, so a hung call
/// blocks the collection instead of failing it.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: ApiToken,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, token: ApiToken) -> Result<Self, CollectError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(CollectError::ClientBuild)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
        })
    }
}

impl CdoTransport for HttpTransport {
    fn get(&self, query: &PageQuery) -> Result<TransportResponse, CollectError> {
        debug!("GET {} ({})", self.endpoint, query);
        let response = self
            .client
            .get(&self.endpoint)
            .header(TOKEN_HEADER, self.token.expose())
            .query(&query.params())
            .send()
            .map_err(|e| CollectError::NetworkRequest(query.to_string(), e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| CollectError::NetworkRequest(query.to_string(), e))?;
        Ok(TransportResponse { status, body })
    }
}

//! Defines the NOAA GSOM datatype code used to select which observations are
//! collected and analyzed.

use std::fmt;
use std::str::FromStr;

/// A GSOM (Global Summary of Month) datatype code such as `TAVG`.
///
/// Codes are stored upper-case. Any non-empty alphanumeric code is accepted,
/// since the CDO API exposes far more datatypes than the handful of
/// temperature metrics this crate is usually run with.
///
/// # Examples
///
/// ```
/// use county_climate::Metric;
///
/// let metric: Metric = "tmax".parse().unwrap();
/// assert_eq!(metric, Metric::tmax());
/// assert_eq!(metric.to_string(), "TMAX");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Metric(String);

impl Metric {
    /// Average temperature for the month.
    pub fn tavg() -> Self {
        Self("TAVG".to_string())
    }

    /// Average of daily minimum temperatures.
    pub fn tmin() -> Self {
        Self("TMIN".to_string())
    }

    /// Average of daily maximum temperatures.
    pub fn tmax() -> Self {
        Self("TMAX".to_string())
    }

    /// Total monthly precipitation.
    pub fn prcp() -> Self {
        Self("PRCP".to_string())
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl Default for Metric {
    fn default() -> Self {
        Self::tavg()
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid GSOM datatype code")]
pub struct InvalidMetric(pub String);

impl FromStr for Metric {
    type Err = InvalidMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidMetric(s.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }
}

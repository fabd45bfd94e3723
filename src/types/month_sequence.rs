//! The collected series for one [`SeriesKey`]: one averaged observation per
//! year, ordered by date.

use crate::types::series_key::SeriesKey;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

pub const DATE_COLUMN: &str = "date";
pub const VALUE_COLUMN: &str = "value";

const FILE_DATE_FORMAT: &str = "%Y-%m-%d";
const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single (date, value) pair of a monthly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// First day of the observed month.
    pub date: NaiveDate,
    /// Metric value averaged across every station reporting for that date.
    pub value: f64,
}

/// Parses both the CDO API timestamp form (`2000-07-01T00:00:00`) and the
/// plain date form written to series files (`2000-07-01`).
pub fn parse_observation_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, API_DATE_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, FILE_DATE_FORMAT))
        .ok()
}

/// An ordered sequence of observations for one place, month and year range.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSequence {
    pub key: SeriesKey,
    pub observations: Vec<Observation>,
}

impl MonthSequence {
    pub fn new(key: SeriesKey, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|obs| obs.date);
        Self { key, observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.value).collect()
    }

    /// Converts the sequence into the two-column `date,value` frame that is
    /// written to disk.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .observations
            .iter()
            .map(|obs| obs.date.format(FILE_DATE_FORMAT).to_string())
            .collect();
        df!(
            DATE_COLUMN => dates,
            VALUE_COLUMN => self.values()
        )
    }

    /// Builds a sequence from a `date,value` frame. Rows with a missing value
    /// are dropped; a date that cannot be parsed is an error.
    pub fn from_dataframe(key: SeriesKey, df: &DataFrame) -> PolarsResult<Self> {
        let dates = df.column(DATE_COLUMN)?.cast(&DataType::String)?;
        let values = df.column(VALUE_COLUMN)?.cast(&DataType::Float64)?;

        let mut observations = Vec::with_capacity(df.height());
        for (raw_date, value) in dates.str()?.into_iter().zip(values.f64()?.into_iter()) {
            let (Some(raw_date), Some(value)) = (raw_date, value) else {
                continue;
            };
            let date = parse_observation_date(raw_date).ok_or_else(|| {
                PolarsError::ComputeError(
                    format!("unparseable date '{}' in series {}", raw_date, key).into(),
                )
            })?;
            observations.push(Observation { date, value });
        }

        Ok(Self::new(key, observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metric::Metric;

    fn key() -> SeriesKey {
        SeriesKey::new(Metric::tavg(), 8013, 7, 2000, 2002)
    }

    fn date(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 7, 1).unwrap()
    }

    #[test]
    fn parses_api_and_file_dates() {
        assert_eq!(parse_observation_date("2000-07-01T00:00:00"), Some(date(2000)));
        assert_eq!(parse_observation_date("2000-07-01"), Some(date(2000)));
        assert_eq!(parse_observation_date("July 2000"), None);
    }

    #[test]
    fn new_orders_by_date() {
        let seq = MonthSequence::new(
            key(),
            vec![
                Observation { date: date(2002), value: 3.0 },
                Observation { date: date(2000), value: 1.0 },
                Observation { date: date(2001), value: 2.0 },
            ],
        );
        assert_eq!(seq.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn dataframe_conversion_keeps_rows() -> Result<(), Box<dyn std::error::Error>> {
        let seq = MonthSequence::new(
            key(),
            vec![
                Observation { date: date(2000), value: 21.5 },
                Observation { date: date(2001), value: 22.25 },
            ],
        );
        let df = seq.to_dataframe()?;
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec![DATE_COLUMN, VALUE_COLUMN]);

        let back = MonthSequence::from_dataframe(key(), &df)?;
        assert_eq!(back, seq);
        Ok(())
    }

    #[test]
    fn from_dataframe_rejects_bad_dates() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("date" => ["not a date"], "value" => [1.0])?;
        assert!(MonthSequence::from_dataframe(key(), &df).is_err());
        Ok(())
    }
}

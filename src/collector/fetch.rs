//! Collection of one monthly series: page through every year of the range,
//! keep the requested datatype, then average across stations per date.

use crate::collector::cdo_api::{parse_page, CdoRecord, CdoTransport, PageQuery};
use crate::collector::config::CollectorConfig;
use crate::collector::error::CollectError;
use crate::types::metric::Metric;
use crate::types::month_sequence::{parse_observation_date, MonthSequence, DATE_COLUMN, VALUE_COLUMN};
use crate::types::series_key::SeriesKey;
use bon::bon;
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;

pub const DEFAULT_START_YEAR: i32 = 1900;
pub const DEFAULT_END_YEAR: i32 = 2017;

/// Station-level `(date, value)` rows accumulated across pages, before
/// averaging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationRows {
    dates: Vec<String>,
    values: Vec<f64>,
}

impl StationRows {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends the records of `metric`, returning how many were kept.
    pub fn extend_matching(
        &mut self,
        records: &[CdoRecord],
        metric: &Metric,
    ) -> Result<usize, CollectError> {
        let before = self.len();
        for record in records.iter().filter(|r| r.datatype == metric.code()) {
            let date = parse_observation_date(&record.date)
                .ok_or_else(|| CollectError::InvalidDate(record.date.clone()))?;
            self.dates.push(date.format("%Y-%m-%d").to_string());
            self.values.push(record.value);
        }
        Ok(self.len() - before)
    }

    pub fn append(&mut self, other: StationRows) {
        self.dates.extend(other.dates);
        self.values.extend(other.values);
    }

    /// Collapses all stations reporting the same date into one row holding
    /// their mean, ordered by date.
    pub fn average_by_date(self, key: SeriesKey) -> Result<MonthSequence, CollectError> {
        if self.is_empty() {
            return Ok(MonthSequence::new(key, Vec::new()));
        }
        let averaged = df!(DATE_COLUMN => self.dates, VALUE_COLUMN => self.values)?
            .lazy()
            .group_by([col(DATE_COLUMN)])
            .agg([col(VALUE_COLUMN).mean()])
            .sort_by_exprs([col(DATE_COLUMN)], SortMultipleOptions::default())
            .collect()?;
        Ok(MonthSequence::from_dataframe(key, &averaged)?)
    }
}

/// Fetches monthly series from the CDO API, one blocking request at a time.
pub struct Collector<T> {
    transport: T,
    config: CollectorConfig,
}

#[bon]
impl<T: CdoTransport> Collector<T> {
    pub fn new(transport: T, config: CollectorConfig) -> Self {
        Self { transport, config }
    }

    /// Builder entry point for [`Collector::fetch`].
    ///
    /// `metric` defaults to `TAVG`, the year range to 1900 through 2017.
    ///
    /// ```no_run
    /// # use county_climate::{ApiToken, Collector, CollectorConfig, HttpTransport, Metric};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = CollectorConfig::default();
    /// let transport = HttpTransport::new(config.endpoint.clone(), ApiToken::from_env()?)?;
    /// let collector = Collector::new(transport, config);
    ///
    /// let july = collector
    ///     .month_sequence()
    ///     .place(8013) // Boulder County, CO
    ///     .month(7)
    ///     .metric(Metric::tmax())
    ///     .start_year(1950)
    ///     .end_year(2017)
    ///     .call()?;
    /// println!("{} years collected", july.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn month_sequence(
        &self,
        place: u32,
        month: u32,
        metric: Option<Metric>,
        start_year: Option<i32>,
        end_year: Option<i32>,
    ) -> Result<MonthSequence, CollectError> {
        let key = SeriesKey::new(
            metric.unwrap_or_default(),
            place,
            month,
            start_year.unwrap_or(DEFAULT_START_YEAR),
            end_year.unwrap_or(DEFAULT_END_YEAR),
        );
        self.fetch(&key)
    }

    /// Collects every year of `key`'s range and averages across stations.
    ///
    /// # Errors
    ///
    /// Any failed page, in any year, aborts the whole collection: the rows
    /// already gathered for earlier years are discarded. Nothing is retried.
    pub fn fetch(&self, key: &SeriesKey) -> Result<MonthSequence, CollectError> {
        if !(1..=12).contains(&key.month) {
            return Err(CollectError::InvalidMonth(key.month));
        }

        let mut rows = StationRows::default();
        for year in key.years() {
            let year_rows = self.fetch_year(key, year).inspect_err(|e| {
                warn!("{}. Aborting this collection.", e);
            })?;
            rows.append(year_rows);
        }
        rows.average_by_date(key.clone())
    }

    /// All station rows of `key.metric` for one year, across every page.
    ///
    /// The first response reports the true record count; requests continue at
    /// offsets stepping by the page size until the offset passes that count.
    pub fn fetch_year(&self, key: &SeriesKey, year: i32) -> Result<StationRows, CollectError> {
        let date = NaiveDate::from_ymd_opt(year, key.month, 1)
            .ok_or(CollectError::InvalidMonth(key.month))?;
        let page_size = self.config.page_size.max(1);

        let mut query = PageQuery::first_page(&self.config, key.place, date);
        let mut count = page_size;
        let mut rows = StationRows::default();
        while query.offset <= count {
            debug!(
                "Year: {} fetching at offset {} count {}",
                year, query.offset, count
            );
            let response = self.transport.get(&query)?;
            let page = parse_page(&query, response)?;
            count = page.metadata.resultset.count;
            rows.extend_matching(&page.results, &key.metric)?;
            query.offset += page_size;
        }

        info!(
            "Collected {} {} rows for {} in {}",
            rows.len(),
            key.metric,
            query.location_id,
            date.format("%Y-%m")
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, datatype: &str, value: f64) -> CdoRecord {
        CdoRecord {
            date: date.to_string(),
            datatype: datatype.to_string(),
            value,
        }
    }

    #[test]
    fn extend_matching_filters_by_datatype() {
        let mut rows = StationRows::default();
        let kept = rows
            .extend_matching(
                &[
                    record("2000-07-01T00:00:00", "TAVG", 10.0),
                    record("2000-07-01T00:00:00", "PRCP", 80.0),
                    record("2000-07-01T00:00:00", "TAVG", 20.0),
                ],
                &Metric::tavg(),
            )
            .unwrap();
        assert_eq!(kept, 2);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn two_stations_on_one_date_average() {
        let mut rows = StationRows::default();
        rows.extend_matching(
            &[
                record("2000-07-01T00:00:00", "TAVG", 10.0),
                record("2000-07-01T00:00:00", "TAVG", 20.0),
            ],
            &Metric::tavg(),
        )
        .unwrap();

        let key = SeriesKey::new(Metric::tavg(), 1001, 7, 2000, 2000);
        let seq = rows.average_by_date(key).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.observations[0].date, NaiveDate::from_ymd_opt(2000, 7, 1).unwrap());
        assert_eq!(seq.observations[0].value, 15.0);
    }

    #[test]
    fn averaged_rows_come_out_in_date_order() {
        let mut rows = StationRows::default();
        rows.extend_matching(
            &[
                record("2002-07-01T00:00:00", "TAVG", 3.0),
                record("2000-07-01T00:00:00", "TAVG", 1.0),
                record("2001-07-01T00:00:00", "TAVG", 2.0),
                record("2000-07-01T00:00:00", "TAVG", 3.0),
            ],
            &Metric::tavg(),
        )
        .unwrap();

        let key = SeriesKey::new(Metric::tavg(), 1001, 7, 2000, 2002);
        let seq = rows.average_by_date(key).unwrap();
        assert_eq!(seq.values(), vec![2.0, 2.0, 3.0]);
    }

    #[test]
    fn bad_record_date_is_an_error() {
        let mut rows = StationRows::default();
        let result = rows.extend_matching(&[record("yesterday", "TAVG", 1.0)], &Metric::tavg());
        assert!(matches!(result, Err(CollectError::InvalidDate(_))));
    }
}

//! The identity of a monthly series file: metric, place, month and year range.
//!
//! Everything the analyzer knows about a series besides its values comes from
//! the file name, so [`SeriesKey::file_name`] and [`SeriesKey::parse_file_name`]
//! must stay exact inverses.

use crate::types::metric::Metric;
use std::fmt;
use std::ops::RangeInclusive;

const FILE_EXTENSION: &str = "csv";

/// Identifies one collected series: the values of `metric` at `place` for
/// calendar `month` in every year of `start_year..=end_year`.
///
/// # Examples
///
/// ```
/// use county_climate::{Metric, SeriesKey};
///
/// let key = SeriesKey::new(Metric::tavg(), 1001, 7, 1900, 2017);
/// assert_eq!(key.file_name(), "TAVG_1001_07_1900_2017.csv");
/// assert_eq!(SeriesKey::parse_file_name(&key.file_name()), Some(key));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub metric: Metric,
    /// FIPS place code, unpadded.
    pub place: u32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    pub start_year: i32,
    /// Last year of the range (inclusive).
    pub end_year: i32,
}

impl SeriesKey {
    pub fn new(metric: Metric, place: u32, month: u32, start_year: i32, end_year: i32) -> Self {
        Self {
            metric,
            place,
            month,
            start_year,
            end_year,
        }
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// `<METRIC>_<place>_<MM>_<start>_<end>.csv`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{:02}_{}_{}.{}",
            self.metric, self.place, self.month, self.start_year, self.end_year, FILE_EXTENSION
        )
    }

    /// Recovers the key from a file name produced by [`SeriesKey::file_name`].
    ///
    /// Returns `None` for anything that is not a series file: wrong extension,
    /// wrong number of fields, non-numeric fields or a month outside 1..=12.
    pub fn parse_file_name(file_name: &str) -> Option<SeriesKey> {
        let stem = file_name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
        let parts: Vec<&str> = stem.split('_').collect();
        let [metric, place, month, start_year, end_year] = parts.as_slice() else {
            return None;
        };

        let month: u32 = month.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }

        Some(SeriesKey {
            metric: metric.parse().ok()?,
            place: place.parse().ok()?,
            month,
            start_year: start_year.parse().ok()?,
            end_year: end_year.parse().ok()?,
        })
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for place {} month {:02} ({}-{})",
            self.metric, self.place, self.month, self.start_year, self.end_year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_encodes_all_five_fields_in_order() {
        let key = SeriesKey::new(Metric::tmax(), 48201, 1, 1950, 2010);
        assert_eq!(key.file_name(), "TMAX_48201_01_1950_2010.csv");
    }

    #[test]
    fn parse_file_name_round_trips_four_digit_places() {
        let key = SeriesKey::new(Metric::tavg(), 8013, 7, 1900, 2017);
        let parsed = SeriesKey::parse_file_name("TAVG_8013_07_1900_2017.csv").unwrap();
        assert_eq!(parsed, key);
        assert_eq!(parsed.years().count(), 118);
    }

    #[test]
    fn parse_file_name_rejects_foreign_files() {
        assert_eq!(SeriesKey::parse_file_name("README.md"), None);
        assert_eq!(SeriesKey::parse_file_name("TAVG_8013_07_1900.csv"), None);
        assert_eq!(SeriesKey::parse_file_name("TAVG_8013_13_1900_2017.csv"), None);
        assert_eq!(SeriesKey::parse_file_name("TAVG_8013_07_1900_2017.txt"), None);
        assert_eq!(SeriesKey::parse_file_name("TAVG_boulder_07_1900_2017.csv"), None);
    }
}

//! Early-vs-late segment comparison of each place's series.
//!
//! The question people actually ask is directional ("is it getting warmer?"),
//! but the t-test is two-sided. [`Indicator::from_ttest`] reads the sign of
//! the statistic to pick a tail and compares the two-sided p-value against
//! doubled one-sided thresholds. Since some places (Boulder, CO among them)
//! come out cooler, the cooling tail is tested as well.

use crate::analysis::ttest::{two_sample_ttest, TTestResult};
use crate::types::indicator::Indicator;
use crate::types::month_sequence::MonthSequence;
use crate::types::place_record::PlaceRecord;
use log::debug;
use std::collections::BTreeMap;

/// Number of leading and trailing observations compared by default.
pub const DEFAULT_WINDOW: usize = 30;

/// Compares the last `window` observations against the first `window`.
///
/// Returns `None` when the sequence is shorter than `2 * window` (or
/// `window` is zero); such places stay unclassified. Values between the two
/// windows do not affect the result.
pub fn classify(sequence: &MonthSequence, window: usize) -> Option<(TTestResult, Indicator)> {
    let len = sequence.len();
    if window == 0 || len < 2 * window {
        return None;
    }

    let values = sequence.values();
    let early = &values[..window];
    let late = &values[len - window..];
    let result = two_sample_ttest(late, early);
    Some((result, Indicator::from_ttest(result.statistic, result.pvalue)))
}

/// Classifies every record in place and returns the tally.
pub fn analyze(records: &mut [PlaceRecord], window: usize) -> IndicatorCounts {
    let mut counts = IndicatorCounts::default();
    for record in records.iter_mut() {
        match classify(&record.sequence, window) {
            Some((ttest, indicator)) => {
                debug!(
                    "{}: t = {:.3}, p = {:.4} -> {}",
                    record.county.display_name(),
                    ttest.statistic,
                    ttest.pvalue,
                    indicator
                );
                record.ttest = Some(ttest);
                record.indicator = Some(indicator);
                counts.add(indicator);
            }
            None => {
                debug!(
                    "{}: {} observations, need {} to classify",
                    record.county.display_name(),
                    record.sequence.len(),
                    2 * window
                );
                record.ttest = None;
                record.indicator = None;
                counts.unclassified += 1;
            }
        }
    }
    counts
}

/// How many places received each indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorCounts {
    pub by_indicator: BTreeMap<Indicator, usize>,
    pub unclassified: usize,
}

impl IndicatorCounts {
    fn add(&mut self, indicator: Indicator) {
        *self.by_indicator.entry(indicator).or_default() += 1;
    }

    pub fn get(&self, indicator: Indicator) -> usize {
        self.by_indicator.get(&indicator).copied().unwrap_or(0)
    }

    pub fn classified(&self) -> usize {
        self.by_indicator.values().sum()
    }
}

impl std::fmt::Display for IndicatorCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for indicator in Indicator::ALL {
            write!(f, "{}={} ", indicator, self.get(indicator))?;
        }
        write!(f, "unclassified={}", self.unclassified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::county::County;
    use crate::types::metric::Metric;
    use crate::types::month_sequence::Observation;
    use crate::types::series_key::SeriesKey;
    use chrono::NaiveDate;

    fn sequence(values: &[f64]) -> MonthSequence {
        let key = SeriesKey::new(Metric::tavg(), 8013, 7, 1900, 1900 + values.len() as i32 - 1);
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Observation {
                date: NaiveDate::from_ymd_opt(1900 + i as i32, 7, 1).unwrap(),
                value,
            })
            .collect();
        MonthSequence::new(key, observations)
    }

    fn record(values: &[f64]) -> PlaceRecord {
        PlaceRecord::new(
            County {
                geoid: 8013,
                name: "Boulder County".to_string(),
                usps: "CO".to_string(),
                latitude: 40.09,
                longitude: -105.36,
            },
            sequence(values),
        )
    }

    /// Small deterministic wobble so samples have non-zero variance.
    fn wobble(base: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| base + [0.0, 0.3, -0.2, 0.4, -0.1][i % 5]).collect()
    }

    #[test]
    fn short_series_is_unclassified() {
        assert_eq!(classify(&sequence(&wobble(20.0, 5)), 3), None);
        assert_eq!(classify(&sequence(&wobble(20.0, 6)), 0), None);
        assert!(classify(&sequence(&wobble(20.0, 6)), 3).is_some());
    }

    #[test]
    fn clear_warming_is_hot() {
        let mut values = wobble(20.0, 10);
        values.extend(wobble(23.0, 10));
        let (ttest, indicator) = classify(&sequence(&values), 10).unwrap();
        assert!(ttest.statistic > 0.0);
        assert_eq!(indicator, Indicator::Hot);
    }

    #[test]
    fn clear_cooling_is_frigid() {
        let mut values = wobble(23.0, 10);
        values.extend(wobble(20.0, 10));
        let (_, indicator) = classify(&sequence(&values), 10).unwrap();
        assert_eq!(indicator, Indicator::Frigid);
    }

    #[test]
    fn middle_values_do_not_matter() {
        let mut a = wobble(20.0, 5);
        a.extend([0.0, 100.0, -40.0]);
        a.extend(wobble(20.5, 5));

        let mut b = wobble(20.0, 5);
        b.extend([15.0; 7]);
        b.extend(wobble(20.5, 5));

        assert_eq!(classify(&sequence(&a), 5), classify(&sequence(&b), 5));
    }

    #[test]
    fn analyze_annotates_and_counts() {
        let mut warm = wobble(20.0, 4);
        warm.extend(wobble(25.0, 4));
        let mut records = vec![record(&warm), record(&wobble(20.0, 3))];

        let counts = analyze(&mut records, 4);

        assert_eq!(records[0].indicator, Some(Indicator::Hot));
        assert!(records[0].ttest.is_some());
        assert_eq!(records[1].indicator, None);
        assert_eq!(records[1].ttest, None);
        assert_eq!(counts.get(Indicator::Hot), 1);
        assert_eq!(counts.classified(), 1);
        assert_eq!(counts.unclassified, 1);
        assert_eq!(counts.to_string(), "H=1 W=0 N=0 C=0 F=0 unclassified=1");
    }
}

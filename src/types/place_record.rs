use crate::analysis::ttest::TTestResult;
use crate::types::county::County;
use crate::types::indicator::Indicator;
use crate::types::month_sequence::MonthSequence;
use crate::types::series_key::SeriesKey;

/// The analyzer's unit of work: one place's series together with its county
/// reference fields.
///
/// `ttest` and `indicator` start out empty and are filled in by
/// [`crate::analyze`]. They stay `None` when the series is too short to
/// classify, which also keeps the place off the rendered map.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub county: County,
    pub sequence: MonthSequence,
    pub ttest: Option<TTestResult>,
    pub indicator: Option<Indicator>,
}

impl PlaceRecord {
    pub fn new(county: County, sequence: MonthSequence) -> Self {
        Self {
            county,
            sequence,
            ttest: None,
            indicator: None,
        }
    }

    pub fn key(&self) -> &SeriesKey {
        &self.sequence.key
    }

    pub fn is_classified(&self) -> bool {
        self.indicator.is_some()
    }
}

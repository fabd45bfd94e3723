//! Collects monthly NOAA climate observations for US counties and classifies
//! each county as warming, cooling or neutral.
//!
//! Two independent pipelines share only the [`CountyTable`]:
//!
//! * **Collector**: [`Collector`] pages through the NOAA CDO API for one
//!   place and calendar month across a year range, averaging station readings
//!   per date; [`SeriesWriter`] stores each series as
//!   `<METRIC>_<place>_<MM>_<start>_<end>.csv`.
//! * **Analyzer**: [`load_places`] reads those files back, [`analyze`] runs
//!   an early-vs-late t-test per place and assigns an [`Indicator`], and
//!   [`MarkerMap`] renders the result.

mod analysis;
mod collector;
mod counties;
mod error;
mod types;
mod utils;

pub use error::ClimateError;

pub use collector::cdo_api::{
    parse_page, CdoPage, CdoRecord, CdoTransport, HttpTransport, PageQuery, TransportResponse,
};
pub use collector::config::{ApiToken, CollectorConfig, API_KEY_ENV};
pub use collector::error::CollectError;
pub use collector::fetch::{Collector, StationRows, DEFAULT_END_YEAR, DEFAULT_START_YEAR};
pub use collector::writer::{SeriesWriter, WriteOutcome};

pub use counties::county_table::CountyTable;
pub use counties::error::CountyTableError;

pub use analysis::classifier::{analyze, classify, IndicatorCounts, DEFAULT_WINDOW};
pub use analysis::error::AnalysisError;
pub use analysis::loader::{load_places, read_series};
pub use analysis::map::{Marker, MarkerMap, DEFAULT_ZOOM, US_CENTER};
pub use analysis::ttest::{two_sample_ttest, TTestResult};

pub use types::county::{fips_location_id, County};
pub use types::indicator::Indicator;
pub use types::metric::{InvalidMetric, Metric};
pub use types::month_sequence::{MonthSequence, Observation};
pub use types::place_record::PlaceRecord;
pub use types::series_key::SeriesKey;

pub use utils::ensure_dir_exists;

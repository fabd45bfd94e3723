//! Loads every series of one metric from the results directory and pairs it
//! with its county reference entry.

use crate::analysis::error::AnalysisError;
use crate::counties::county_table::CountyTable;
use crate::types::metric::Metric;
use crate::types::month_sequence::MonthSequence;
use crate::types::place_record::PlaceRecord;
use crate::types::series_key::SeriesKey;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Reads one `date,value` series file.
pub fn read_series(path: &Path, key: SeriesKey) -> Result<MonthSequence, AnalysisError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| AnalysisError::SeriesRead(path.to_path_buf(), e))?;
    MonthSequence::from_dataframe(key, &df)
        .map_err(|e| AnalysisError::SeriesRead(path.to_path_buf(), e))
}

/// Loads all series files of `metric` found in `results_dir`.
///
/// Files whose names are not series names, or that belong to another metric,
/// are ignored. Records come back ordered by place code. When several files
/// exist for one place (different months or year ranges), the one whose name
/// sorts last wins.
///
/// # Errors
///
/// Fails if the directory or a matching file cannot be read, or if a file's
/// place code has no entry in `counties`.
pub fn load_places(
    results_dir: &Path,
    metric: &Metric,
    counties: &CountyTable,
) -> Result<Vec<PlaceRecord>, AnalysisError> {
    let entries = std::fs::read_dir(results_dir)
        .map_err(|e| AnalysisError::ResultsDirRead(results_dir.to_path_buf(), e))?;

    let mut file_names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AnalysisError::ResultsDirRead(results_dir.to_path_buf(), e))?;
        if let Ok(name) = entry.file_name().into_string() {
            file_names.push(name);
        }
    }
    file_names.sort();

    let mut places: BTreeMap<u32, PlaceRecord> = BTreeMap::new();
    for file_name in file_names {
        let Some(key) = SeriesKey::parse_file_name(&file_name) else {
            debug!("Ignoring non-series file {}", file_name);
            continue;
        };
        if &key.metric != metric {
            continue;
        }

        let path = results_dir.join(&file_name);
        let county = counties
            .lookup(key.place)
            .map_err(|source| AnalysisError::CountyLookup {
                path: path.clone(),
                source,
            })?
            .clone();
        let sequence = read_series(&path, key)?;

        if let Some(previous) = places.insert(county.geoid, PlaceRecord::new(county, sequence)) {
            warn!(
                "Replacing series {} with {}",
                previous.key().file_name(),
                file_name
            );
        }
    }

    info!(
        "Loaded {} {} series from {}",
        places.len(),
        metric,
        results_dir.display()
    );
    Ok(places.into_values().collect())
}

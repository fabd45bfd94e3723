//! The read-only county reference table, loaded once at start-up and handed
//! to both the collector and the analyzer.

use crate::counties::error::CountyTableError;
use crate::types::county::County;
use log::info;
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;

const GEOID_COLUMN: &str = "geoid";
const NAME_COLUMN: &str = "name";
const USPS_COLUMN: &str = "usps";
const LAT_COLUMN: &str = "lat";
const LONG_COLUMN: &str = "long";

/// Lookup table from FIPS place code to [`County`].
///
/// Rows keep the order of the source file, which [`CountyTable::first_per_state`]
/// relies on. If a place code appears twice, the first row wins.
#[derive(Debug, Clone, Default)]
pub struct CountyTable {
    counties: Vec<County>,
    index: HashMap<u32, usize>,
}

impl CountyTable {
    /// Reads the reference CSV. Only the `geoid`, `name`, `usps`, `lat` and
    /// `long` columns are used; any others are ignored.
    pub fn from_csv(path: &Path) -> Result<Self, CountyTableError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| CountyTableError::Read(path.to_path_buf(), e))?
            .finish()
            .map_err(|e| CountyTableError::Read(path.to_path_buf(), e))?;

        let table = Self::from_dataframe(&df)?;
        info!(
            "Loaded {} counties from reference table {:?}",
            table.len(),
            path
        );
        Ok(table)
    }

    pub fn from_dataframe(df: &DataFrame) -> Result<Self, CountyTableError> {
        let geoids = typed_column(df, GEOID_COLUMN, DataType::Int64)?;
        let names = typed_column(df, NAME_COLUMN, DataType::String)?;
        let states = typed_column(df, USPS_COLUMN, DataType::String)?;
        let lats = typed_column(df, LAT_COLUMN, DataType::Float64)?;
        let longs = typed_column(df, LONG_COLUMN, DataType::Float64)?;

        let geoids = geoids.i64().map_err(column_error(GEOID_COLUMN))?;
        let names = names.str().map_err(column_error(NAME_COLUMN))?;
        let states = states.str().map_err(column_error(USPS_COLUMN))?;
        let lats = lats.f64().map_err(column_error(LAT_COLUMN))?;
        let longs = longs.f64().map_err(column_error(LONG_COLUMN))?;

        let mut counties = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let geoid = require(geoids.get(row), GEOID_COLUMN, row)?;
            let geoid = u32::try_from(geoid)
                .map_err(|_| CountyTableError::InvalidPlaceCode { value: geoid, row })?;
            counties.push(County {
                geoid,
                name: require(names.get(row), NAME_COLUMN, row)?.trim().to_string(),
                usps: require(states.get(row), USPS_COLUMN, row)?.trim().to_string(),
                latitude: require(lats.get(row), LAT_COLUMN, row)?,
                longitude: require(longs.get(row), LONG_COLUMN, row)?,
            });
        }

        Ok(Self::from_counties(counties))
    }

    pub fn from_counties(counties: Vec<County>) -> Self {
        let mut index = HashMap::with_capacity(counties.len());
        for (i, county) in counties.iter().enumerate() {
            index.entry(county.geoid).or_insert(i);
        }
        Self { counties, index }
    }

    pub fn get(&self, place: u32) -> Option<&County> {
        self.index.get(&place).map(|&i| &self.counties[i])
    }

    /// Like [`CountyTable::get`], but an unknown place code is an error.
    pub fn lookup(&self, place: u32) -> Result<&County, CountyTableError> {
        self.get(place).ok_or(CountyTableError::UnknownPlace(place))
    }

    /// The first county listed for each state, in file order.
    pub fn first_per_state(&self) -> Vec<&County> {
        let mut seen = HashSet::new();
        self.counties
            .iter()
            .filter(|county| seen.insert(county.usps.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &County> {
        self.counties.iter()
    }

    pub fn len(&self) -> usize {
        self.counties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }
}

fn typed_column(df: &DataFrame, name: &str, dtype: DataType) -> Result<Column, CountyTableError> {
    df.column(name)
        .and_then(|column| column.cast(&dtype))
        .map_err(column_error(name))
}

fn column_error(name: &str) -> impl Fn(PolarsError) -> CountyTableError + '_ {
    move |e| CountyTableError::ColumnNotFound(name.to_string(), e)
}

fn require<T>(value: Option<T>, column: &str, row: usize) -> Result<T, CountyTableError> {
    value.ok_or_else(|| CountyTableError::MissingValue {
        column: column.to_string(),
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_frame() -> DataFrame {
        df!(
            "usps" => ["AL", "AL", "CO", "CO"],
            "geoid" => [1001i64, 1003, 8013, 8031],
            "name" => ["Autauga County", "Baldwin County", "Boulder County", "Denver County"],
            "lat" => [32.53, 30.66, 40.09, 39.76],
            "long" => [-86.64, -87.75, -105.36, -104.88]
        )
        .unwrap()
    }

    #[test]
    fn lookup_by_place_code() {
        let table = CountyTable::from_dataframe(&sample_frame()).unwrap();
        assert_eq!(table.len(), 4);

        let boulder = table.lookup(8013).unwrap();
        assert_eq!(boulder.name, "Boulder County");
        assert_eq!(boulder.usps, "CO");
        assert_eq!(boulder.latitude, 40.09);

        assert!(matches!(
            table.lookup(99999),
            Err(CountyTableError::UnknownPlace(99999))
        ));
    }

    #[test]
    fn first_per_state_keeps_file_order() {
        let table = CountyTable::from_dataframe(&sample_frame()).unwrap();
        let firsts: Vec<u32> = table.first_per_state().iter().map(|c| c.geoid).collect();
        assert_eq!(firsts, vec![1001, 8013]);
    }

    #[test]
    fn missing_column_is_reported() {
        let df = sample_frame().drop("lat").unwrap();
        let err = CountyTable::from_dataframe(&df).unwrap_err();
        assert!(matches!(err, CountyTableError::ColumnNotFound(ref c, _) if c == "lat"));
    }

    #[test]
    fn reads_csv_with_extra_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "usps,geoid,ansicode,name,lat,long").unwrap();
        writeln!(file, "AL,1001,00161526,Autauga County,32.532237,-86.64644").unwrap();
        writeln!(file, "WY,56045,01605087,Weston County,43.839612,-104.567488").unwrap();
        file.flush().unwrap();

        let table = CountyTable::from_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(56045).unwrap().display_name(), "Weston County, WY");
        assert_eq!(table.lookup(1001).unwrap().longitude, -86.64644);
    }
}

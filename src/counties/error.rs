use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CountyTableError {
    #[error("Failed to read county reference table '{0}'")]
    Read(PathBuf, #[source] PolarsError),

    #[error("Required column '{0}' missing from county reference table")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Missing value in column '{column}' at row {row} of county reference table")]
    MissingValue { column: String, row: usize },

    #[error("Place code {value} in row {row} is not a valid FIPS code")]
    InvalidPlaceCode { value: i64, row: usize },

    #[error("Place code {0} not found in county reference table")]
    UnknownPlace(u32),
}

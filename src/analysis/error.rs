use crate::counties::error::CountyTableError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read results directory '{0}'")]
    ResultsDirRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to read series file '{0}'")]
    SeriesRead(PathBuf, #[source] PolarsError),

    #[error("No county reference entry for series file '{path}'")]
    CountyLookup {
        path: PathBuf,
        #[source]
        source: CountyTableError,
    },

    #[error("Failed to create map output directory '{0}'")]
    MapDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to serialize map markers")]
    MarkerEncode(#[from] serde_json::Error),

    #[error("Failed to write map '{0}'")]
    MapWrite(PathBuf, #[source] std::io::Error),
}

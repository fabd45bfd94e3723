use crate::analysis::error::AnalysisError;
use crate::collector::error::CollectError;
use crate::counties::error::CountyTableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    CountyTable(#[from] CountyTableError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

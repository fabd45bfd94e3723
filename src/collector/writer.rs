//! Writes collected series to the results directory, one CSV per
//! [`SeriesKey`], skipping any series whose file already exists.

use crate::collector::cdo_api::CdoTransport;
use crate::collector::error::CollectError;
use crate::collector::fetch::Collector;
use crate::types::month_sequence::MonthSequence;
use crate::types::series_key::SeriesKey;
use crate::utils::ensure_dir_exists;
use log::{info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Temp files are created owner-only; series files are shared like any
/// other CSV output.
#[cfg(unix)]
const SERIES_FILE_MODE: u32 = 0o644;

/// What [`SeriesWriter::write_month_sequence`] did for one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new series file was written.
    Written(PathBuf),
    /// The file already existed; nothing was fetched.
    Skipped(PathBuf),
    /// Collection succeeded but produced no rows, so no file was written.
    NoData,
}

pub struct SeriesWriter {
    results_dir: PathBuf,
}

impl SeriesWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn path_for(&self, key: &SeriesKey) -> PathBuf {
        self.results_dir.join(key.file_name())
    }

    /// Collects `key` and writes it, unless its file is already present.
    ///
    /// Presence is checked by name only; an existing file is never
    /// re-validated or refreshed.
    ///
    /// # Errors
    ///
    /// Returns the [`CollectError`] that aborted collection, or an I/O error
    /// from writing the file. No file is left behind in either case.
    pub fn write_month_sequence<T: CdoTransport>(
        &self,
        collector: &Collector<T>,
        key: &SeriesKey,
    ) -> Result<WriteOutcome, CollectError> {
        let path = self.path_for(key);
        info!("Fetching sequence for: {}", key);
        if path.exists() {
            info!(
                "Output file {} already exists. Skipping collection.",
                path.display()
            );
            return Ok(WriteOutcome::Skipped(path));
        }

        let sequence = collector.fetch(key).inspect_err(|e| {
            warn!("Collection failed ({}). No output file generated.", e);
        })?;
        if sequence.is_empty() {
            warn!("Collection returned no rows for {}. No output file generated.", key);
            return Ok(WriteOutcome::NoData);
        }

        self.write(&sequence, &path)?;
        info!("Wrote {} rows to {}", sequence.len(), path.display());
        Ok(WriteOutcome::Written(path))
    }

    /// Writes through a temporary file in the results directory so a crash
    /// mid-write never leaves a partial file that would later be skipped.
    fn write(&self, sequence: &MonthSequence, path: &Path) -> Result<(), CollectError> {
        ensure_dir_exists(&self.results_dir)
            .map_err(|e| CollectError::ResultsDirCreation(self.results_dir.clone(), e))?;

        let mut df = sequence
            .to_dataframe()
            .map_err(|e| CollectError::SeriesWrite(path.to_path_buf(), e))?;
        let mut temp_file = NamedTempFile::new_in(&self.results_dir)
            .map_err(|e| CollectError::SeriesWriteIo(path.to_path_buf(), e))?;
        CsvWriter::new(temp_file.as_file_mut())
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| CollectError::SeriesWrite(path.to_path_buf(), e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            temp_file
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(SERIES_FILE_MODE))
                .map_err(|e| CollectError::SeriesWriteIo(path.to_path_buf(), e))?;
        }
        temp_file
            .persist(path)
            .map_err(|e| CollectError::SeriesWriteIo(path.to_path_buf(), e.error))?;
        Ok(())
    }
}

//! Historical training data loading.
//!
//! The bundled dataset is a CSV with at least the columns
//! `OPERA, TIPOVUELO, MES, Fecha-I, Fecha-O`; extra columns are ignored.
//! It is read once per cold start. The [`TrainingSource`] trait exists so
//! the model service can be exercised with injected data in tests.

use crate::error::Result;
use crate::types::FlightRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// Source of historical flight records for cold-start training.
pub trait TrainingSource {
    fn load(&self) -> Result<Vec<FlightRecord>>;
}

/// CSV-backed training source.
pub struct CsvTrainingSource {
    path: PathBuf,
}

impl CsvTrainingSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrainingSource for CsvTrainingSource {
    fn load(&self) -> Result<Vec<FlightRecord>> {
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| {
            crate::error::Error::MalformedInput(format!(
                "failed to open dataset {}: {e}",
                self.path.display()
            ))
        })?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: FlightRecord = row?;
            records.push(record);
        }

        info!(
            rows = records.len(),
            path = %self.path.display(),
            "Loaded historical dataset"
        );
        Ok(records)
    }
}

//! Process-lifetime model cache.
//!
//! Guarantees a trained [`DelayModel`] exists before the first prediction
//! and is reused for every request after: a cache with capacity 1, no
//! eviction, populated through a one-shot initialization gate. Cold start
//! either loads a persisted artifact or trains from the historical dataset
//! and persists the result for future processes.

use crate::config::ModelConfig;
use crate::dataset::{CsvTrainingSource, TrainingSource};
use crate::error::Result;
use crate::models::delay::{DelayModel, TrainingParams};
use crate::types::FlightRecord;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing::info;

/// Serves predictions from a single lazily-initialized trained model.
///
/// Concurrent cold-start callers block on the cell until the one
/// initialization sequence finishes; no two trainings ever run. A failed
/// initialization leaves the slot empty, so the error propagates instead
/// of publishing a partially-fit model.
pub struct ModelService {
    artifact_path: PathBuf,
    params: TrainingParams,
    source: Box<dyn TrainingSource + Send + Sync>,
    slot: OnceCell<DelayModel>,
}

impl ModelService {
    /// Build a service over the configured CSV dataset and artifact path.
    pub fn new(config: &ModelConfig) -> Self {
        Self::with_source(
            PathBuf::from(&config.artifact_path),
            Box::new(CsvTrainingSource::new(&config.training_data_path)),
            config.training_params(),
        )
    }

    /// Build a service with an injected training source.
    pub fn with_source(
        artifact_path: PathBuf,
        source: Box<dyn TrainingSource + Send + Sync>,
        params: TrainingParams,
    ) -> Self {
        Self {
            artifact_path,
            params,
            source,
            slot: OnceCell::new(),
        }
    }

    /// Run the initialization gate now instead of on the first request.
    ///
    /// The serving binary calls this before binding the listener so that
    /// cold-start training cost lands at boot time.
    pub fn warm_up(&self) -> Result<()> {
        self.model().map(|_| ())
    }

    /// Whether the model slot has been populated.
    pub fn is_ready(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Predict delay labels for a raw batch, one 0/1 per record.
    pub fn predict(&self, batch: &[FlightRecord]) -> Result<Vec<u8>> {
        let model = self.model()?;
        let features = model.preprocess(batch)?;
        model.predict(&features)
    }

    fn model(&self) -> Result<&DelayModel> {
        self.slot.get_or_try_init(|| self.initialize())
    }

    /// Load the persisted artifact if one exists, otherwise train from the
    /// historical dataset and persist the result.
    fn initialize(&self) -> Result<DelayModel> {
        if self.artifact_path.exists() {
            info!(path = %self.artifact_path.display(), "Reusing persisted model artifact");
            return DelayModel::load(&self.artifact_path, self.params.clone());
        }

        info!(path = %self.artifact_path.display(), "No artifact found, training from dataset");
        let records = self.source.load()?;

        let mut model = DelayModel::with_params(self.params.clone());
        let (features, labels) = model.preprocess_training(&records)?;
        model.fit(&features, &labels)?;
        model.save(&self.artifact_path)?;

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Training source that counts how many times it is read.
    struct CountingSource {
        loads: Arc<AtomicUsize>,
    }

    impl TrainingSource for CountingSource {
        fn load(&self) -> Result<Vec<FlightRecord>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(sample_records())
        }
    }

    fn sample_records() -> Vec<FlightRecord> {
        let mut records = Vec::new();
        for i in 0..32 {
            let (opera, tipo, mes) = match i % 4 {
                0 => ("Grupo LATAM", "I", 7),
                1 => ("Sky Airline", "N", 12),
                2 => ("Copa Air", "I", 4),
                _ => ("JetSmart SPA", "N", 5),
            };
            let fecha_o = if i % 2 == 0 {
                "2017-06-01 09:30:00"
            } else {
                "2017-06-01 09:10:00"
            };
            records.push(FlightRecord::with_times(
                opera,
                tipo,
                mes,
                "2017-06-01 09:00:00",
                fecha_o,
            ));
        }
        records
    }

    fn counting_service(dir: &TempDir, loads: Arc<AtomicUsize>) -> ModelService {
        ModelService::with_source(
            dir.path().join("delay.model"),
            Box::new(CountingSource { loads }),
            TrainingParams {
                iterations: 20,
                ..TrainingParams::default()
            },
        )
    }

    #[test]
    fn test_first_use_trains_once_and_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let loads = Arc::new(AtomicUsize::new(0));
        let service = counting_service(&dir, loads.clone());

        assert!(!service.is_ready());

        let batch = vec![FlightRecord::new("Grupo LATAM", "I", 7)];
        let first = service.predict(&batch).unwrap();
        let second = service.predict(&batch).unwrap();

        assert_eq!(first, second);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(dir.path().join("delay.model").exists());
        assert!(service.is_ready());
    }

    #[test]
    fn test_fresh_service_loads_artifact_without_training() {
        let dir = TempDir::new().unwrap();

        let first_loads = Arc::new(AtomicUsize::new(0));
        let first = counting_service(&dir, first_loads.clone());
        first.warm_up().unwrap();
        assert_eq!(first_loads.load(Ordering::SeqCst), 1);

        // Simulates a fresh process over the same artifact path: the
        // training source must never be touched.
        let second_loads = Arc::new(AtomicUsize::new(0));
        let second = counting_service(&dir, second_loads.clone());

        let batch = vec![FlightRecord::new("Sky Airline", "N", 12)];
        let from_first = first.predict(&batch).unwrap();
        let from_second = second.predict(&batch).unwrap();

        assert_eq!(from_first, from_second);
        assert_eq!(second_loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_concurrent_cold_start_trains_exactly_once() {
        let dir = TempDir::new().unwrap();
        let loads = Arc::new(AtomicUsize::new(0));
        let service = Arc::new(counting_service(&dir, loads.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || {
                    service
                        .predict(&[FlightRecord::new("Copa Air", "I", 4)])
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<Vec<u8>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_validation_errors_surface_unchanged() {
        let dir = TempDir::new().unwrap();
        let loads = Arc::new(AtomicUsize::new(0));
        let service = counting_service(&dir, loads);

        let err = service
            .predict(&[FlightRecord::new("Sky Airline", "X", 5)])
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidTipoVuelo(_)));
    }
}

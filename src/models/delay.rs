//! Delay prediction model.
//!
//! Orchestrates preprocessing, label derivation and class-imbalance-aware
//! training, and owns the trained gradient-boosted classifier. The
//! classifier is consumed as a black box: `fit` over the fixed feature
//! matrix, `predict` back to 0/1 labels, and whole-model save/load through
//! its own artifact format.

use crate::encoder::{FeatureEncoder, FeatureMatrix};
use crate::error::{Error, Result};
use crate::features;
use crate::types::FlightRecord;
use crate::validator;
use gbdt::config::Config as BoosterConfig;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use std::path::Path;
use tracing::{debug, info};

/// Training hyperparameters for the boosted classifier.
///
/// Fixed values keep training deterministic for a given dataset.
#[derive(Debug, Clone)]
pub struct TrainingParams {
    /// Number of boosting iterations
    pub iterations: usize,
    /// Maximum depth of each tree
    pub max_depth: u32,
    /// Shrinkage (learning rate)
    pub shrinkage: f32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            iterations: 100,
            max_depth: 4,
            shrinkage: 0.01,
        }
    }
}

/// Binary delay classifier over the fixed 10-column feature matrix.
///
/// Constructed empty, trained once via [`fit`](DelayModel::fit), read-only
/// for [`predict`](DelayModel::predict) afterwards.
pub struct DelayModel {
    encoder: FeatureEncoder,
    params: TrainingParams,
    booster: Option<GBDT>,
}

impl DelayModel {
    /// Create an untrained model with default hyperparameters.
    pub fn new() -> Self {
        Self::with_params(TrainingParams::default())
    }

    /// Create an untrained model with explicit hyperparameters.
    pub fn with_params(params: TrainingParams) -> Self {
        Self {
            encoder: FeatureEncoder::new(),
            params,
            booster: None,
        }
    }

    /// Whether the classifier has been fit (or loaded from an artifact).
    pub fn is_trained(&self) -> bool {
        self.booster.is_some()
    }

    /// Prepare a caller-supplied batch for prediction.
    ///
    /// Validates categorical domains, then encodes onto the fixed feature
    /// set. The returned matrix always has the full 10 columns in training
    /// order, whatever subset of categories the batch contains.
    pub fn preprocess(&self, records: &[FlightRecord]) -> Result<FeatureMatrix> {
        validator::validate_batch(records)?;
        Ok(self.encoder.encode(records))
    }

    /// Prepare trusted training rows: features plus derived delay labels.
    ///
    /// Derives `period_day`, `high_season` and `min_diff` per record; the
    /// first two are not part of the current feature set but must still
    /// evaluate cleanly, so derivation failures abort preprocessing. The
    /// label is 1 iff the flight left more than 15 minutes late.
    pub fn preprocess_training(
        &self,
        records: &[FlightRecord],
    ) -> Result<(FeatureMatrix, Vec<u8>)> {
        info!(rows = records.len(), "Preprocessing training data");

        let mut labels = Vec::with_capacity(records.len());
        let mut high_season_rows = 0usize;
        let mut unbucketed_rows = 0usize;

        for record in records {
            let fecha_i = record.fecha_i.as_deref().unwrap_or("");
            let fecha_o = record.fecha_o.as_deref().unwrap_or("");

            if features::get_period_day(fecha_i)?.is_none() {
                unbucketed_rows += 1;
            }
            if features::is_high_season(fecha_i)? {
                high_season_rows += 1;
            }

            let min_diff = features::get_min_diff(fecha_i, fecha_o)?;
            labels.push(u8::from(min_diff > features::DELAY_THRESHOLD_MINUTES));
        }

        debug!(
            high_season_rows,
            unbucketed_rows,
            delayed = labels.iter().filter(|&&l| l == 1).count(),
            "Derived training labels"
        );

        Ok((self.encoder.encode(records), labels))
    }

    /// Fit the classifier on a preprocessed matrix and its labels.
    ///
    /// The class balance `n_on_time / n_delayed` is applied as a training
    /// weight on every delayed row, compensating for delay being the
    /// minority class. A single-class training set is rejected before the
    /// ratio is formed.
    pub fn fit(&mut self, features: &FeatureMatrix, labels: &[u8]) -> Result<()> {
        if features.n_rows() != labels.len() {
            return Err(Error::Processing(format!(
                "feature rows ({}) do not match labels ({})",
                features.n_rows(),
                labels.len()
            )));
        }

        let n_delayed = labels.iter().filter(|&&l| l == 1).count();
        let n_on_time = labels.len() - n_delayed;

        if n_delayed == 0 {
            return Err(Error::DegenerateTrainingSet(
                "no delayed examples".to_string(),
            ));
        }
        if n_on_time == 0 {
            return Err(Error::DegenerateTrainingSet(
                "no on-time examples".to_string(),
            ));
        }

        let scale = n_on_time as f32 / n_delayed as f32;
        info!(
            rows = labels.len(),
            n_on_time, n_delayed, scale, "Starting model training"
        );

        // Log-likelihood loss trains on +/-1 labels; delayed rows carry the
        // class-balance scale as their sample weight.
        let mut train_data: DataVec = features
            .rows()
            .iter()
            .zip(labels)
            .map(|(row, &label)| {
                let (target, weight) = if label == 1 { (1.0, scale) } else { (-1.0, 1.0) };
                Data::new_training_data(row.clone(), weight, target, None)
            })
            .collect();

        let mut config = BoosterConfig::new();
        config.set_feature_size(self.encoder.feature_count());
        config.set_max_depth(self.params.max_depth);
        config.set_iterations(self.params.iterations);
        config.set_shrinkage(self.params.shrinkage);
        config.set_loss("LogLikelyhood");

        let mut booster = GBDT::new(&config);
        booster.fit(&mut train_data);
        self.booster = Some(booster);

        info!("Model training completed");
        Ok(())
    }

    /// Predict delay labels for a preprocessed batch, order-preserving.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u8>> {
        let booster = self.booster.as_ref().ok_or(Error::ModelNotTrained)?;

        if features.n_rows() == 0 {
            return Ok(Vec::new());
        }

        let test_data: DataVec = features
            .rows()
            .iter()
            .map(|row| Data::new_test_data(row.clone(), None))
            .collect();

        // Under log-likelihood loss the booster outputs P(delayed).
        let predictions = booster.predict(&test_data);
        debug!(rows = predictions.len(), "Predictions computed");

        Ok(predictions.iter().map(|&p| u8::from(p >= 0.5)).collect())
    }

    /// Persist the trained classifier to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let booster = self.booster.as_ref().ok_or(Error::ModelNotTrained)?;
        let filename = path_str(path)?;

        booster
            .save_model(filename)
            .map_err(|e| Error::ModelStore(format!("failed to save {}: {e}", path.display())))?;

        info!(path = %path.display(), "Model artifact saved");
        Ok(())
    }

    /// Load a previously persisted classifier from `path`.
    pub fn load(path: &Path, params: TrainingParams) -> Result<Self> {
        let filename = path_str(path)?;

        let booster = GBDT::load_model(filename)
            .map_err(|e| Error::ModelStore(format!("failed to load {}: {e}", path.display())))?;

        info!(path = %path.display(), "Model artifact loaded");
        Ok(Self {
            encoder: FeatureEncoder::new(),
            params,
            booster: Some(booster),
        })
    }
}

impl Default for DelayModel {
    fn default() -> Self {
        Self::new()
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::ModelStore(format!("non-utf8 artifact path {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn training_batch() -> Vec<FlightRecord> {
        // Alternating delayed (20 min late) and on-time (5 min late) rows
        // across both in-set and out-of-set categories.
        let mut records = Vec::new();
        for i in 0..24 {
            let (opera, tipo, mes) = match i % 4 {
                0 => ("Grupo LATAM", "I", 7),
                1 => ("Sky Airline", "N", 12),
                2 => ("Copa Air", "I", 4),
                _ => ("Aerolineas Argentinas", "N", 2),
            };
            let fecha_o = if i % 2 == 0 {
                "2017-03-10 10:20:00"
            } else {
                "2017-03-10 10:05:00"
            };
            records.push(FlightRecord::with_times(
                opera,
                tipo,
                mes,
                "2017-03-10 10:00:00",
                fecha_o,
            ));
        }
        records
    }

    fn trained_model() -> DelayModel {
        let mut model = DelayModel::new();
        let records = training_batch();
        let (features, labels) = model.preprocess_training(&records).unwrap();
        model.fit(&features, &labels).unwrap();
        model
    }

    #[test]
    fn test_preprocess_returns_fixed_matrix() {
        let model = DelayModel::new();
        let batch = vec![FlightRecord::new("Sky Airline", "N", 7)];

        let matrix = model.preprocess(&batch).unwrap();

        assert_eq!(matrix.n_rows(), 1);
        assert_eq!(matrix.n_cols(), 10);
    }

    #[test]
    fn test_preprocess_rejects_invalid_month() {
        let model = DelayModel::new();
        let batch = vec![FlightRecord::new("Sky Airline", "N", 13)];

        let err = model.preprocess(&batch).unwrap_err();
        assert!(matches!(err, Error::InvalidMonthValue(13)));
    }

    #[test]
    fn test_preprocess_training_derives_labels() {
        let model = DelayModel::new();
        let records = vec![
            FlightRecord::with_times(
                "Grupo LATAM",
                "I",
                1,
                "2023-01-01 10:00:00",
                "2023-01-01 10:20:00",
            ),
            FlightRecord::with_times(
                "Grupo LATAM",
                "I",
                1,
                "2023-01-01 10:00:00",
                "2023-01-01 10:10:00",
            ),
        ];

        let (features, labels) = model.preprocess_training(&records).unwrap();

        assert_eq!(features.n_rows(), 2);
        assert_eq!(labels, vec![1, 0]);
    }

    #[test]
    fn test_preprocess_training_propagates_timestamp_errors() {
        let model = DelayModel::new();
        let records = vec![FlightRecord::with_times(
            "Grupo LATAM",
            "I",
            1,
            "not-a-timestamp",
            "2023-01-01 10:20:00",
        )];

        let err = model.preprocess_training(&records).unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp(_)));
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = DelayModel::new();
        let matrix = model
            .preprocess(&[FlightRecord::new("Sky Airline", "N", 7)])
            .unwrap();

        let err = model.predict(&matrix).unwrap_err();
        assert!(matches!(err, Error::ModelNotTrained));
    }

    #[test]
    fn test_fit_rejects_single_class_labels() {
        let mut model = DelayModel::new();
        let batch = vec![
            FlightRecord::new("Sky Airline", "N", 7),
            FlightRecord::new("Copa Air", "I", 4),
        ];
        let features = model.preprocess(&batch).unwrap();

        let err = model.fit(&features, &[0, 0]).unwrap_err();
        assert!(matches!(err, Error::DegenerateTrainingSet(_)));

        let err = model.fit(&features, &[1, 1]).unwrap_err();
        assert!(matches!(err, Error::DegenerateTrainingSet(_)));
    }

    #[test]
    fn test_predict_is_order_preserving_and_idempotent() {
        let model = trained_model();
        let batch = vec![
            FlightRecord::new("Grupo LATAM", "I", 7),
            FlightRecord::new("Aerolineas Argentinas", "N", 2),
            FlightRecord::new("Sky Airline", "N", 12),
        ];
        let features = model.preprocess(&batch).unwrap();

        let first = model.predict(&features).unwrap();
        let second = model.predict(&features).unwrap();

        assert_eq!(first.len(), batch.len());
        assert_eq!(first, second);
        assert!(first.iter().all(|&l| l <= 1));
    }

    #[test]
    fn test_predict_empty_batch() {
        let model = trained_model();
        let features = model.preprocess(&[]).unwrap();

        assert_eq!(model.predict(&features).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_save_load_round_trip_preserves_predictions() {
        let model = trained_model();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("delay.model");

        model.save(&path).unwrap();
        let loaded = DelayModel::load(&path, TrainingParams::default()).unwrap();

        let batch = vec![
            FlightRecord::new("Grupo LATAM", "I", 7),
            FlightRecord::new("Sky Airline", "N", 12),
        ];
        let features = model.preprocess(&batch).unwrap();

        assert_eq!(
            model.predict(&features).unwrap(),
            loaded.predict(&features).unwrap()
        );
    }

    #[test]
    fn test_save_before_fit_fails() {
        let model = DelayModel::new();
        let dir = TempDir::new().unwrap();

        let err = model.save(&dir.path().join("delay.model")).unwrap_err();
        assert!(matches!(err, Error::ModelNotTrained));
    }
}

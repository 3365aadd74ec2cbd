//! Feature encoding for the delay prediction model.
//!
//! Transforms raw flight records into the fixed numeric matrix the
//! classifier was trained on. Categorical columns (airline, flight type,
//! month) become one-hot indicators restricted to a predetermined
//! 10-column set; the projection onto that set is what keeps a batch with
//! rare or missing categories compatible with the training-time matrix.

use crate::types::FlightRecord;
use tracing::debug;

/// One target column: the categorical field and value it indicates
#[derive(Debug, Clone, Copy, PartialEq)]
enum FeatureKey {
    Opera(&'static str),
    TipoVuelo(&'static str),
    Mes(i32),
}

/// The fixed feature set, in model input order.
///
/// Order is the contract: the classifier addresses features positionally,
/// so a reordered or missing column silently corrupts every prediction.
const TARGET_FEATURES: [(&str, FeatureKey); 10] = [
    ("OPERA_Latin American Wings", FeatureKey::Opera("Latin American Wings")),
    ("MES_7", FeatureKey::Mes(7)),
    ("MES_10", FeatureKey::Mes(10)),
    ("OPERA_Grupo LATAM", FeatureKey::Opera("Grupo LATAM")),
    ("MES_12", FeatureKey::Mes(12)),
    ("TIPOVUELO_I", FeatureKey::TipoVuelo("I")),
    ("MES_4", FeatureKey::Mes(4)),
    ("MES_11", FeatureKey::Mes(11)),
    ("OPERA_Sky Airline", FeatureKey::Opera("Sky Airline")),
    ("OPERA_Copa Air", FeatureKey::Opera("Copa Air")),
];

/// Feature matrix over exactly the fixed target columns, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f32>>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        TARGET_FEATURES.len()
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f32>> {
        self.rows
    }
}

/// Encoder that projects raw records onto the fixed feature set.
///
/// A category absent from the batch contributes an all-zero column, a
/// category outside the target set contributes nothing, and the column
/// order never varies with batch content.
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a batch of records into the fixed 10-column matrix.
    pub fn encode(&self, records: &[FlightRecord]) -> FeatureMatrix {
        let rows = records.iter().map(|r| self.encode_record(r)).collect();
        debug!(
            rows = records.len(),
            cols = TARGET_FEATURES.len(),
            "Encoded feature matrix"
        );
        FeatureMatrix { rows }
    }

    fn encode_record(&self, record: &FlightRecord) -> Vec<f32> {
        TARGET_FEATURES
            .iter()
            .map(|(_, key)| {
                let hit = match key {
                    FeatureKey::Opera(name) => record.opera == *name,
                    FeatureKey::TipoVuelo(code) => record.tipovuelo == *code,
                    FeatureKey::Mes(month) => record.mes == *month,
                };
                if hit {
                    1.0
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Number of feature columns produced.
    pub fn feature_count(&self) -> usize {
        TARGET_FEATURES.len()
    }

    /// Canonical column names, in matrix order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        TARGET_FEATURES.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

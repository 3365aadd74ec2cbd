//! Prediction request and response wire types

use crate::types::flight::FlightRecord;
use serde::{Deserialize, Serialize};

/// Body of `POST /predict`: a batch of raw flight records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub flights: Vec<FlightRecord>,
}

/// Response of `POST /predict`: one 0/1 label per input record,
/// insertion-order aligned with the request batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predict: Vec<u8>,
}

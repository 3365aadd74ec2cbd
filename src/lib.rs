//! Flight Delay Prediction Service Library
//!
//! Predicts whether a commercial flight will be delayed. Raw flight
//! records are validated, encoded onto a fixed 10-column feature matrix
//! and scored by a gradient-boosted classifier that is trained at most
//! once per process lifetime and persisted for reuse.

pub mod api;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod error;
pub mod features;
pub mod models;
pub mod types;
pub mod validator;

pub use config::AppConfig;
pub use dataset::{CsvTrainingSource, TrainingSource};
pub use encoder::{FeatureEncoder, FeatureMatrix};
pub use error::{Error, Result};
pub use models::{DelayModel, ModelService};
pub use types::{FlightRecord, PredictionRequest, PredictionResponse};

//! Type definitions for the flight delay service

pub mod flight;
pub mod request;

pub use flight::FlightRecord;
pub use request::{PredictionRequest, PredictionResponse};

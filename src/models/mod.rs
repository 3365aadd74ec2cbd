//! Delay model and its process-lifetime cache

pub mod delay;
pub mod service;

pub use delay::{DelayModel, TrainingParams};
pub use service::ModelService;

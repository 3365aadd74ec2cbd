//! Configuration management for the flight delay service

use crate::models::delay::TrainingParams;
use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Model training and persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path of the persisted model artifact
    pub artifact_path: String,
    /// Path of the historical training dataset (CSV)
    pub training_data_path: String,
    /// Boosting iterations (default: 100)
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Maximum tree depth (default: 4)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Shrinkage / learning rate (default: 0.01)
    #[serde(default = "default_shrinkage")]
    pub shrinkage: f32,
}

fn default_iterations() -> usize {
    100
}

fn default_max_depth() -> u32 {
    4
}

fn default_shrinkage() -> f32 {
    0.01
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl ModelConfig {
    /// Classifier hyperparameters as consumed by the delay model.
    pub fn training_params(&self) -> TrainingParams {
        TrainingParams {
            iterations: self.iterations,
            max_depth: self.max_depth,
            shrinkage: self.shrinkage,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            model: ModelConfig {
                artifact_path: "saved_model.gbdt".to_string(),
                training_data_path: "data/flights.csv".to_string(),
                iterations: default_iterations(),
                max_depth: default_max_depth(),
                shrinkage: default_shrinkage(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

//! Satisfaction Predictor - HTTP prediction service for the satisfaction model
//!
//! Loads a pre-trained regression artifact once at startup and serves
//! single-row predictions over `POST /predict`.

pub mod config;
pub mod core;
pub mod models;
pub mod regressor;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{Predictor, PredictionError};
pub use models::{FeatureVector, PredictionRequest, PredictionResponse, MODEL_VERSION};
pub use regressor::{load_model, LoadedModel, ModelError, Regressor};

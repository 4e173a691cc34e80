// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FeatureVector, MODEL_VERSION};
pub use requests::PredictionRequest;
pub use responses::{PredictionResponse, HealthResponse, ErrorResponse};

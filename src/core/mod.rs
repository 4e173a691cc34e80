// Core prediction exports
pub mod features;
pub mod predictor;

pub use features::{coerce_feature, extract_features};
pub use predictor::{Predictor, PredictionError};

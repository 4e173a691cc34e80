use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use crate::core::features::extract_features;
use crate::models::{FeatureVector, PredictionRequest, PredictionResponse, MODEL_VERSION};
use crate::regressor::Regressor;

/// Errors that can occur while serving a single prediction
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Missing feature: {0}")]
    MissingFeature(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidFeature { name: &'static str, value: String },

    #[error("Model produced a non-finite prediction for {0:?}")]
    NonFiniteOutput(FeatureVector),
}

/// Serves predictions from a single read-only regressor
///
/// Cloning is cheap: the regressor is shared, never copied or mutated.
#[derive(Clone)]
pub struct Predictor {
    regressor: Arc<dyn Regressor>,
    strict_features: bool,
}

impl Predictor {
    pub fn new(regressor: Arc<dyn Regressor>) -> Self {
        Self {
            regressor,
            strict_features: false,
        }
    }

    /// Reject requests with absent features instead of defaulting them to 0
    pub fn with_strict_features(mut self, strict: bool) -> Self {
        self.strict_features = strict;
        self
    }

    pub fn strict_features(&self) -> bool {
        self.strict_features
    }

    /// Run the model on an already extracted feature vector
    pub fn score(&self, features: FeatureVector) -> Result<f64, PredictionError> {
        let score = self.regressor.predict(features.to_row());

        if !score.is_finite() {
            return Err(PredictionError::NonFiniteOutput(features));
        }

        Ok(score)
    }

    /// Extract features from the request body, run the model, build the response
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, PredictionError> {
        let features = extract_features(request, self.strict_features)?;
        let satisfaction_score = self.score(features)?;

        tracing::debug!(
            "Predicted {} for engagement={}, experience={}",
            satisfaction_score,
            features.engagement_score,
            features.experience_score
        );

        Ok(PredictionResponse {
            satisfaction_score,
            model_version: MODEL_VERSION.to_string(),
        })
    }
}

impl fmt::Debug for Predictor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predictor")
            .field("strict_features", &self.strict_features)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regressor::LinearModel;

    fn create_test_predictor() -> Predictor {
        Predictor::new(Arc::new(LinearModel::new(vec![2.0, 0.5], 1.0)))
    }

    #[test]
    fn test_predict() {
        let predictor = create_test_predictor();
        let response = predictor.predict(&PredictionRequest::from_scores(5.0, 3.0)).unwrap();

        assert_eq!(response.satisfaction_score, 12.5);
        assert_eq!(response.model_version, "1.0.0");
    }

    #[test]
    fn test_empty_request_uses_zero_features() {
        let predictor = create_test_predictor();
        let empty = predictor.predict(&PredictionRequest::default()).unwrap();
        let zeros = predictor.predict(&PredictionRequest::from_scores(0.0, 0.0)).unwrap();

        assert_eq!(empty, zeros);
        assert_eq!(empty.satisfaction_score, 1.0);
    }

    #[test]
    fn test_strict_predictor() {
        let predictor = create_test_predictor().with_strict_features(true);
        assert!(predictor.strict_features());

        let result = predictor.predict(&PredictionRequest::default());
        assert!(matches!(result, Err(PredictionError::MissingFeature("engagement_score"))));
    }

    #[test]
    fn test_overflow_is_rejected() {
        let predictor = create_test_predictor();
        let result = predictor.score(FeatureVector::new(f64::MAX, 0.0));
        assert!(matches!(result, Err(PredictionError::NonFiniteOutput(_))));
    }

    #[test]
    fn test_deterministic() {
        let predictor = create_test_predictor();
        let request = PredictionRequest::from_scores(7.25, -1.5);

        let first = predictor.predict(&request).unwrap();
        let second = predictor.predict(&request).unwrap();
        assert_eq!(first, second);
    }
}

use serde::{Deserialize, Serialize};
use crate::regressor::FEATURE_COUNT;

/// Version reported with every prediction
pub const MODEL_VERSION: &str = "1.0.0";

/// Extracted model input for a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub engagement_score: f64,
    pub experience_score: f64,
}

impl FeatureVector {
    pub fn new(engagement_score: f64, experience_score: f64) -> Self {
        Self { engagement_score, experience_score }
    }

    /// Single row in training column order
    #[inline]
    pub fn to_row(&self) -> [f64; FEATURE_COUNT] {
        [self.engagement_score, self.experience_score]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_order() {
        let features = FeatureVector::new(5.0, 3.0);
        assert_eq!(features.to_row(), [5.0, 3.0]);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(FeatureVector::default().to_row(), [0.0, 0.0]);
    }
}

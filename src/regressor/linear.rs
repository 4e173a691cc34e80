use serde::{Deserialize, Serialize};
use crate::regressor::{ModelError, Regressor, FEATURE_COUNT};

/// Ordinary linear regression: `intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self { coefficients, intercept }
    }

    /// Check that the model accepts exactly one row of `FEATURE_COUNT` columns
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Shape {
                expected: FEATURE_COUNT,
                got: self.coefficients.len(),
            });
        }

        if let Some(i) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite(format!("coefficients[{}]", i)));
        }

        if !self.intercept.is_finite() {
            return Err(ModelError::NonFinite("intercept".to_string()));
        }

        Ok(())
    }
}

impl Regressor for LinearModel {
    #[inline]
    fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64 {
        self.coefficients
            .iter()
            .zip(features.iter())
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}

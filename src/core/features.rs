use serde_json::Value;
use crate::core::PredictionError;
use crate::models::{FeatureVector, PredictionRequest};
use crate::regressor::FEATURE_NAMES;

/// Extract the model input from a request body
///
/// Absent keys default to 0 unless `strict` is set, in which case they are
/// rejected. A key that is present with a `null` value is not absent.
pub fn extract_features(
    request: &PredictionRequest,
    strict: bool,
) -> Result<FeatureVector, PredictionError> {
    let [engagement, experience] = FEATURE_NAMES;
    let engagement_score = coerce_feature(engagement, request.field(engagement), strict)?;
    let experience_score = coerce_feature(experience, request.field(experience), strict)?;

    Ok(FeatureVector {
        engagement_score,
        experience_score,
    })
}

/// Coerce a single JSON value into a finite feature value
///
/// Accepts numbers, booleans (1/0) and strings holding a number. Anything
/// else, `null` included, is an incompatible type.
pub fn coerce_feature(
    name: &'static str,
    value: Option<&Value>,
    strict: bool,
) -> Result<f64, PredictionError> {
    let value = match value {
        Some(v) => v,
        None if strict => return Err(PredictionError::MissingFeature(name)),
        None => return Ok(0.0),
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };

    match number {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(PredictionError::InvalidFeature {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> PredictionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_extract_numbers() {
        let features = extract_features(&request(json!({"engagement_score": 5, "experience_score": 3.5})), false).unwrap();
        assert_eq!(features, FeatureVector::new(5.0, 3.5));
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        let features = extract_features(&request(json!({})), false).unwrap();
        assert_eq!(features, FeatureVector::new(0.0, 0.0));

        let features = extract_features(&request(json!({"experience_score": 2})), false).unwrap();
        assert_eq!(features, FeatureVector::new(0.0, 2.0));
    }

    #[test]
    fn test_explicit_null_is_invalid() {
        let result = extract_features(&request(json!({"engagement_score": null, "experience_score": 3})), false);
        assert!(matches!(result, Err(PredictionError::InvalidFeature { name: "engagement_score", .. })));
    }

    #[test]
    fn test_strict_rejects_missing() {
        let result = extract_features(&request(json!({"engagement_score": 1})), true);
        assert!(matches!(result, Err(PredictionError::MissingFeature("experience_score"))));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_feature("x", Some(&json!("4.25")), false).unwrap(), 4.25);
        assert_eq!(coerce_feature("x", Some(&json!(" 7 ")), false).unwrap(), 7.0);
        assert_eq!(coerce_feature("x", Some(&json!(true)), false).unwrap(), 1.0);
        assert_eq!(coerce_feature("x", Some(&json!(false)), false).unwrap(), 0.0);
        assert_eq!(coerce_feature("x", Some(&json!(-2)), false).unwrap(), -2.0);
    }

    #[test]
    fn test_incompatible_types() {
        for value in [json!(null), json!("high"), json!([1, 2]), json!({"v": 1}), json!("NaN"), json!("inf")] {
            let result = coerce_feature("engagement_score", Some(&value), false);
            assert!(
                matches!(result, Err(PredictionError::InvalidFeature { name: "engagement_score", .. })),
                "expected {} to be rejected",
                value
            );
        }
    }
}

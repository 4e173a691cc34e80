use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST /predict`
///
/// Kept as a raw JSON object so that missing fields, numeric strings and
/// incompatible types can be told apart during feature extraction. Bodies
/// that are not JSON objects fail to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionRequest {
    fields: Map<String, Value>,
}

impl PredictionRequest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a request from explicit numeric features
    pub fn from_scores(engagement_score: f64, experience_score: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("engagement_score".to_string(), Value::from(engagement_score));
        fields.insert("experience_score".to_string(), Value::from(experience_score));
        Self { fields }
    }

    /// Raw value of a field, `None` only when the key is absent
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_body() {
        let req: PredictionRequest =
            serde_json::from_str(r#"{"engagement_score": 5, "extra": "ignored"}"#).unwrap();
        assert_eq!(req.field("engagement_score"), Some(&Value::from(5)));
        assert_eq!(req.field("experience_score"), None);
    }

    #[test]
    fn test_null_is_present() {
        let req: PredictionRequest = serde_json::from_str(r#"{"experience_score": null}"#).unwrap();
        assert_eq!(req.field("experience_score"), Some(&Value::Null));
        assert_eq!(req.field("engagement_score"), None);
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(serde_json::from_str::<PredictionRequest>("[5, 3]").is_err());
        assert!(serde_json::from_str::<PredictionRequest>("42").is_err());
        assert!(serde_json::from_str::<PredictionRequest>("").is_err());
    }
}

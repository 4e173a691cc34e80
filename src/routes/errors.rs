use actix_web::{error, http::StatusCode, HttpResponse};
use crate::core::PredictionError;
use crate::models::ErrorResponse;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
///
/// A body that is empty, not JSON, or not a JSON object cannot be turned into
/// a prediction and is reported as a server error. Bodies over the configured
/// size limit are rejected before parsing.
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::warn!("JSON payload error on {}: {}", req.path(), err);
    payload_error(&err).into()
}

fn payload_error(err: &error::JsonPayloadError) -> JsonError {
    let (error, message, status) = match err {
        error::JsonPayloadError::OverflowKnownLength { .. } | error::JsonPayloadError::Overflow { .. } => (
            "payload_too_large",
            format!("Payload too large: {}", err),
            StatusCode::PAYLOAD_TOO_LARGE,
        ),
        error::JsonPayloadError::ContentType => (
            "unsupported_content_type",
            "Content type must be application/json".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
        _ => (
            "invalid_json",
            format!("Invalid JSON: {}", err),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    };

    JsonError {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    }
}

impl error::ResponseError for PredictionError {
    fn status_code(&self) -> StatusCode {
        match self {
            PredictionError::MissingFeature(_) => StatusCode::BAD_REQUEST,
            PredictionError::InvalidFeature { .. } | PredictionError::NonFiniteOutput(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            PredictionError::MissingFeature(_) => "missing_feature",
            PredictionError::InvalidFeature { .. } => "invalid_feature",
            PredictionError::NonFiniteOutput(_) => "prediction_failed",
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message: self.to_string(),
            status_code: self.status_code().as_u16(),
        })
    }
}

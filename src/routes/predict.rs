use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use crate::core::{Predictor, PredictionError};
use crate::models::{HealthResponse, PredictionRequest, MODEL_VERSION};
use crate::regressor::{LoadedModel, ModelKind};

/// Metadata about the artifact being served
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub kind: ModelKind,
    pub loaded_at: DateTime<Utc>,
}

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: Predictor,
    pub model: ModelInfo,
}

impl AppState {
    pub fn new(model: LoadedModel, strict_features: bool) -> Self {
        Self {
            predictor: Predictor::new(model.regressor).with_strict_features(strict_features),
            model: ModelInfo {
                kind: model.kind,
                loaded_at: model.loaded_at,
            },
        }
    }
}

/// Configure prediction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_version: MODEL_VERSION.to_string(),
        model_kind: state.model.kind.to_string(),
        model_loaded_at: state.model.loaded_at,
        timestamp: Utc::now(),
    })
}

/// Predict endpoint
///
/// POST /predict
///
/// Request body:
/// ```json
/// {
///   "engagement_score": 5,
///   "experience_score": 3
/// }
/// ```
///
/// Both fields are optional and default to 0.
async fn predict(
    state: web::Data<AppState>,
    req: web::Json<PredictionRequest>,
) -> Result<HttpResponse, PredictionError> {
    let response = state.predictor.predict(&req).map_err(|e| {
        tracing::info!("Prediction failed: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(response))
}

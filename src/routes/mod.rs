// Route exports
pub mod errors;
pub mod predict;

use actix_web::web;

pub use errors::{handle_json_payload_error, JsonError};
pub use predict::{AppState, ModelInfo};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predict::configure);
}

/// JSON extractor config: payload limit plus the service's error mapping
pub fn json_config(max_payload_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_bytes)
        .error_handler(handle_json_payload_error)
}

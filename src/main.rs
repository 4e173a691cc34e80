use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use satisfaction_predictor::config::{LogFormat, LoggingSettings, Settings};
use satisfaction_predictor::regressor::load_model;
use satisfaction_predictor::routes::{self, AppState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            // Logging settings are unavailable, fall back to the default format
            init_logging(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging);

    info!("Starting satisfaction prediction service...");

    // The service cannot start without a usable model
    let model = load_model(&settings.model.path).map_err(|e| {
        error!("Failed to load model from {}: {}", settings.model.path.display(), e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!("Loaded {} model from {}", model.kind, model.path.display());

    let strict_features = settings.prediction.strict_features;
    if strict_features {
        info!("Strict feature mode enabled: requests missing a feature are rejected");
    }

    let app_state = AppState::new(model, strict_features);

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let max_payload_bytes = settings.server.max_payload_bytes;

    info!("Starting HTTP server on {}:{}", host, port);

    let mut server = HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config(max_payload_bytes))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    });

    if let Some(workers) = settings.server.workers {
        server = server.workers(workers);
    }

    server.bind((host, port))?.run().await
}

/// Initialize logging; RUST_LOG takes precedence over the configured level
fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Full => subscriber.init(),
    }
}

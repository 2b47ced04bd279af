use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use affinity_engine::config::Settings;
use affinity_engine::core::{AffinityScorer, CampaignGenerator, FraudRules};
use affinity_engine::models::FactorWeights;
use affinity_engine::routes::{self, AppState};
use affinity_engine::services::{EmbeddingCache, EmbeddingService, OpenAiClient};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

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
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Affinity Engine...");

    let openai = Arc::new(
        OpenAiClient::new(
            settings.openai.base_url.clone(),
            settings.openai.api_key.clone(),
            settings.openai.embedding_model.clone(),
            settings.openai.chat_model.clone(),
            settings.openai.temperature,
            settings.openai.timeout_secs.unwrap_or(30),
        )
        .map_err(|e| {
            error!("Failed to build OpenAI client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?,
    );

    if settings.openai.api_key.is_empty() {
        warn!("OPENAI_API_KEY not set; embeddings and mediation will report errors");
    }

    let cache_capacity = settings.cache.embedding_capacity.unwrap_or(10_000);
    let cache_ttl = settings.cache.ttl_secs.unwrap_or(3600);
    let embeddings = EmbeddingService::new(
        openai.clone(),
        EmbeddingCache::new(cache_capacity, cache_ttl),
    );

    info!("Embedding cache initialized ({} entries, TTL: {}s)", cache_capacity, cache_ttl);

    let weights = FactorWeights::from(&settings.scoring.weights);
    if (weights.sum() - 1.0).abs() > 1e-9 {
        warn!("Default factor weights sum to {}, scores will not be normalized", weights.sum());
    }
    let scorer = AffinityScorer::new(weights);

    info!("Scorer initialized with weights: {:?}", weights);

    let app_state = AppState {
        scorer,
        embeddings,
        rewriter: openai,
        fraud_rules: FraudRules {
            price_floor: settings.fraud.price_floor,
        },
        campaigns: CampaignGenerator::new(settings.campaign.deep_link_base.clone()),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;
use crate::core::{
    anonymize_message, check_provider, risk_score, AffinityScorer, CampaignGenerator, FraudRules,
};
use crate::models::{
    AnonymizeRequest, AnonymizeResponse, CampaignRequest, CampaignResponse, EmbeddingRequest,
    EmbeddingResponse, ErrorResponse, FraudScanRequest, FraudScanResponse, HealthResponse,
    ScoreRequest, ScoreResponse, SignalCheckRequest, SignalCheckResponse,
};
use crate::services::{EmbeddingService, TextRewriter};

pub const SCORE_EXPLANATION: &str = "Calculated using 7-Factor Affinity Engine.";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub scorer: AffinityScorer,
    pub embeddings: EmbeddingService,
    pub rewriter: Arc<dyn TextRewriter>,
    pub fraud_rules: FraudRules,
    pub campaigns: CampaignGenerator,
}

/// Configure all engine routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/score", web::post().to(score_match))
        .route("/mediate/anonymize", web::post().to(anonymize))
        .route("/fraud/scan", web::post().to(scan_transaction))
        .route("/fraud/check-provider", web::post().to(check_provider_signals))
        .route("/campaign/generate", web::post().to(generate_campaign))
        .route("/embeddings", web::post().to(generate_embedding));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "MatchOS Affinity Engine",
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    tracing::trace!("Embedding cache: {:?}", state.embeddings.cache().stats());

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one request/provider pair
///
/// POST /score
///
/// Request body:
/// ```json
/// {
///   "request": { "title": "string", "budget_max": 100 },
///   "provider": { "skills": ["string"], "rate": 90 },
///   "categoryConfig": { "reputation_weights": { "category_fit": 0.5 } },
///   "embed": false
/// }
/// ```
///
/// Malformed payloads score 0.0 with a diagnostic instead of failing.
async fn score_match(state: web::Data<AppState>, body: web::Json<Value>) -> impl Responder {
    let payload: ScoreRequest = match serde_json::from_value(body.into_inner()) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected score payload: {}", e);
            return HttpResponse::Ok().json(ScoreResponse {
                score: 0.0,
                explanation: None,
                breakdown: None,
                error: Some(e.to_string()),
            });
        }
    };

    let ScoreRequest {
        mut request,
        mut provider,
        category_config,
        embed,
    } = payload;

    if embed {
        state.embeddings.attach_embeddings(&mut request, &mut provider).await;
    }

    let breakdown = state
        .scorer
        .score(&request, &provider, category_config.as_ref());

    tracing::info!(
        "Scored request {:?} / provider {:?}: {}",
        request.id,
        provider.id,
        breakdown.score
    );

    HttpResponse::Ok().json(ScoreResponse {
        score: breakdown.score,
        explanation: Some(SCORE_EXPLANATION.to_string()),
        breakdown: Some(breakdown),
        error: None,
    })
}

/// Rewrite a message to the requested privacy level
///
/// On rewriter failure the original text is returned alongside the error.
async fn anonymize(
    state: web::Data<AppState>,
    req: web::Json<AnonymizeRequest>,
) -> impl Responder {
    let result = anonymize_message(
        state.rewriter.as_ref(),
        &req.text,
        req.privacy_level,
        req.category_prompt.as_deref(),
    )
    .await;

    let response = match result {
        Ok(sanitized_text) => AnonymizeResponse {
            sanitized_text,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Anonymization failed, returning original text: {}", e);
            AnonymizeResponse {
                sanitized_text: req.text.clone(),
                error: Some(e.to_string()),
            }
        }
    };

    HttpResponse::Ok().json(response)
}

async fn scan_transaction(
    state: web::Data<AppState>,
    req: web::Json<FraudScanRequest>,
) -> impl Responder {
    let signals = state
        .fraud_rules
        .scan_transaction(&req.transaction, &req.category_config);
    let risk_score = risk_score(&signals);

    HttpResponse::Ok().json(FraudScanResponse { signals, risk_score })
}

async fn check_provider_signals(req: web::Json<SignalCheckRequest>) -> impl Responder {
    let signals = check_provider(&req.provider);
    if !signals.is_empty() {
        tracing::info!("Provider {:?} raised {:?}", req.provider.id, signals);
    }

    HttpResponse::Ok().json(SignalCheckResponse { signals })
}

async fn generate_campaign(
    state: web::Data<AppState>,
    req: web::Json<CampaignRequest>,
) -> impl Responder {
    let response = match state.campaigns.generate(&req.request, &req.category_config) {
        Ok(campaigns) => CampaignResponse {
            campaigns,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Campaign generation failed for {:?}: {}", req.request.id, e);
            CampaignResponse {
                campaigns: Default::default(),
                error: Some(e.to_string()),
            }
        }
    };

    HttpResponse::Ok().json(response)
}

async fn generate_embedding(
    state: web::Data<AppState>,
    req: web::Json<EmbeddingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let response = match state.embeddings.embed(&req.text).await {
        Ok(embedding) => EmbeddingResponse {
            embedding,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Embedding request failed: {}", e);
            EmbeddingResponse {
                embedding: vec![],
                error: Some(e.to_string()),
            }
        }
    };

    HttpResponse::Ok().json(response)
}

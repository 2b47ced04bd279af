// Integration tests for the HTTP host

use actix_web::{test, web, App};
use affinity_engine::core::{AffinityScorer, CampaignGenerator, FraudRules};
use affinity_engine::routes::{configure_routes, AppState};
use affinity_engine::services::{Embedder, EmbeddingCache, EmbeddingService, ServiceError, TextRewriter};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Embeds text as a one-hot vector on whether it mentions plumbing
struct KeywordEmbedder;

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        if text.to_lowercase().contains("plumb") {
            Ok(vec![1.0, 0.0])
        } else {
            Ok(vec![0.0, 1.0])
        }
    }
}

struct RedactingRewriter;

#[async_trait]
impl TextRewriter for RedactingRewriter {
    async fn rewrite(&self, _system: &str, text: &str) -> Result<String, ServiceError> {
        Ok(text.replace("Karim", "User"))
    }
}

struct BrokenRewriter;

#[async_trait]
impl TextRewriter for BrokenRewriter {
    async fn rewrite(&self, _system: &str, _text: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Unauthorized)
    }
}

fn create_state(rewriter: Arc<dyn TextRewriter>) -> AppState {
    AppState {
        scorer: AffinityScorer::with_default_weights(),
        embeddings: EmbeddingService::new(Arc::new(KeywordEmbedder), EmbeddingCache::new(100, 60)),
        rewriter,
        fraud_rules: FraudRules::default(),
        campaigns: CampaignGenerator::new("https://matchos.dz/r"),
    }
}

async fn post_json(state: AppState, path: &str, body: Value) -> Value {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post().uri(path).set_json(body).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success(), "{} returned {}", path, resp.status());

    test::read_body_json(resp).await
}

#[actix_web::test]
async fn test_score_endpoint() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/score",
        json!({
            "request": {"budget_max": 100, "languages": ["en"]},
            "provider": {"rate": 90, "reputation_base": 80, "languages": ["en"], "distance_km": 2},
        }),
    )
    .await;

    assert!((body["score"].as_f64().unwrap() - 0.68).abs() < 1e-9);
    assert_eq!(body["explanation"], "Calculated using 7-Factor Affinity Engine.");
    assert_eq!(body["breakdown"]["weights"]["category_fit"], 0.25);
}

#[actix_web::test]
async fn test_score_endpoint_with_category_config() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/score",
        json!({
            "request": {},
            "provider": {},
            "categoryConfig": {"reputation_weights": {"category_fit": 0.5}},
        }),
    )
    .await;

    assert_eq!(body["breakdown"]["weights"]["category_fit"], 0.5);
    assert_eq!(body["breakdown"]["weights"]["privacy_compatibility"], 0.1);
}

#[actix_web::test]
async fn test_score_endpoint_embeds_on_request() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/score",
        json!({
            "request": {"title": "Leaking pipe", "description": "need plumbing help"},
            "provider": {"skills": ["plumbing"]},
            "embed": true,
        }),
    )
    .await;

    assert_eq!(body["breakdown"]["sub_scores"]["category_fit"], 1.0);
}

#[actix_web::test]
async fn test_score_endpoint_malformed_payload_scores_zero() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/score",
        json!({
            "request": {"budget_max": "lots"},
            "provider": {},
        }),
    )
    .await;

    assert_eq!(body["score"], 0.0);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_anonymize_endpoint() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/mediate/anonymize",
        json!({"text": "Karim will call you", "privacyLevel": "alias"}),
    )
    .await;
    assert_eq!(body["sanitizedText"], "User will call you");

    let public = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/mediate/anonymize",
        json!({"text": "Karim will call you", "privacyLevel": "public"}),
    )
    .await;
    assert_eq!(public["sanitizedText"], "Karim will call you");
}

#[actix_web::test]
async fn test_anonymize_failure_returns_original() {
    let body = post_json(
        create_state(Arc::new(BrokenRewriter)),
        "/mediate/anonymize",
        json!({"text": "Karim will call you", "privacyLevel": "ghost"}),
    )
    .await;

    assert_eq!(body["sanitizedText"], "Karim will call you");
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_anonymize_rejects_unknown_privacy_level() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(Arc::new(RedactingRewriter))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mediate/anonymize")
        .set_json(json!({"text": "Karim will call you", "privacyLevel": "standard"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_fraud_endpoints() {
    let scan = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/fraud/scan",
        json!({
            "transaction": {"amount": 250},
            "categoryConfig": {"fraud_signals": ["price_below_market_30_percent"]},
        }),
    )
    .await;
    assert_eq!(scan["signals"], json!(["PRICE_TOO_LOW"]));
    assert_eq!(scan["riskScore"], 0.25);

    let check = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/fraud/check-provider",
        json!({"provider": {"reputation_base": 5}}),
    )
    .await;
    assert_eq!(check["signals"], json!(["LOW_REPUTATION"]));
}

#[actix_web::test]
async fn test_campaign_endpoint() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/campaign/generate",
        json!({
            "request": {"id": "r42", "title": "Airport pickup", "location_name": "Algiers"},
            "categoryConfig": {
                "ai_campaigns": {
                    "platforms": ["telegram"],
                    "ad_copy_template": "{service_type} near {neighborhood} {deep_link}",
                }
            },
        }),
    )
    .await;

    assert_eq!(
        body["campaigns"]["telegram"]["copy"],
        "Airport pickup near Algiers https://matchos.dz/r/r42"
    );
    assert_eq!(body["campaigns"]["telegram"]["schedule"], "immediate");
}

#[actix_web::test]
async fn test_campaign_endpoint_bad_template() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/campaign/generate",
        json!({
            "request": {},
            "categoryConfig": {"ai_campaigns": {"ad_copy_template": "{mystery}"}},
        }),
    )
    .await;

    assert_eq!(body["campaigns"], json!({}));
    assert!(body["error"].as_str().unwrap().contains("mystery"));
}

#[actix_web::test]
async fn test_embeddings_endpoint() {
    let body = post_json(
        create_state(Arc::new(RedactingRewriter)),
        "/embeddings",
        json!({"text": "plumber"}),
    )
    .await;

    assert_eq!(body["embedding"], json!([1.0, 0.0]));
}

#[actix_web::test]
async fn test_embeddings_endpoint_rejects_empty_text() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(Arc::new(RedactingRewriter))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/embeddings")
        .set_json(json!({"text": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_state(Arc::new(RedactingRewriter))))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{CategoryConfig, PrivacyLevel, Provider, ServiceRequest, Transaction};

/// Request to score one request/provider pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub request: ServiceRequest,
    pub provider: Provider,
    #[serde(default, alias = "category_config", rename = "categoryConfig")]
    pub category_config: Option<CategoryConfig>,
    /// Populate missing embeddings before scoring
    #[serde(default)]
    pub embed: bool,
}

/// Request to strip identifying details from a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizeRequest {
    pub text: String,
    #[serde(alias = "privacy_level", rename = "privacyLevel")]
    pub privacy_level: PrivacyLevel,
    #[serde(default, alias = "category_prompt", rename = "categoryPrompt")]
    pub category_prompt: Option<String>,
}

/// Request to screen a transaction against category fraud rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudScanRequest {
    pub transaction: Transaction,
    #[serde(default, alias = "category_config", rename = "categoryConfig")]
    pub category_config: CategoryConfig,
}

/// Request to run provider-level fraud signals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalCheckRequest {
    pub provider: Provider,
}

/// Request to generate ad copy for a service request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignRequest {
    pub request: ServiceRequest,
    #[serde(default, alias = "category_config", rename = "categoryConfig")]
    pub category_config: CategoryConfig,
}

/// Request to embed free text
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmbeddingRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

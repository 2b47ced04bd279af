// Service exports
pub mod cache;
pub mod embeddings;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use cache::{EmbeddingCache, CacheStats};
pub use embeddings::EmbeddingService;
pub use openai::OpenAiClient;

/// Errors returned by external text/embedding collaborators
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Service not configured: {0}")]
    NotConfigured(String),
}

/// Produces fixed-length embedding vectors for free text
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError>;
}

/// Rewrites text under a system instruction
#[async_trait]
pub trait TextRewriter: Send + Sync {
    async fn rewrite(&self, system: &str, text: &str) -> Result<String, ServiceError>;
}

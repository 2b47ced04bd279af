use std::sync::Arc;
use crate::models::{Provider, ServiceRequest};
use crate::services::{Embedder, EmbeddingCache, ServiceError};

/// Embeds request and provider text ahead of scoring
///
/// Failures never block scoring: a field that cannot be embedded is left
/// empty and the scorer falls back to keyword matching.
#[derive(Clone)]
pub struct EmbeddingService {
    embedder: Arc<dyn Embedder>,
    cache: EmbeddingCache,
}

impl EmbeddingService {
    pub fn new(embedder: Arc<dyn Embedder>, cache: EmbeddingCache) -> Self {
        Self { embedder, cache }
    }

    /// Embed text, consulting the cache first
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        if let Some(hit) = self.cache.get(text).await {
            return Ok(hit.as_ref().clone());
        }

        let embedding = self.embedder.embed(text).await?;
        self.cache.insert(text, embedding.clone()).await;
        Ok(embedding)
    }

    /// Fill in any missing embeddings on a request/provider pair
    pub async fn attach_embeddings(&self, request: &mut ServiceRequest, provider: &mut Provider) {
        if request.embedding.is_none() {
            request.embedding = self.embed_optional(request.search_text().trim()).await;
        }
        if provider.embedding.is_none() {
            provider.embedding = self.embed_optional(&provider.skills.join(", ")).await;
        }
    }

    async fn embed_optional(&self, text: &str) -> Option<Vec<f32>> {
        if text.is_empty() {
            return None;
        }

        match self.embed(text).await {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                tracing::warn!("Embedding failed, falling back to keyword match: {}", e);
                None
            }
        }
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// In-memory embedding cache keyed by the embedded text
///
/// Repeated request titles and provider skill lists skip the upstream call
/// while the entry is live.
#[derive(Clone)]
pub struct EmbeddingCache {
    entries: moka::future::Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    /// Create a new cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub async fn get(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        let hit = self.entries.get(&CacheKey::embedding(text)).await;
        if hit.is_some() {
            tracing::trace!("Embedding cache hit ({} chars)", text.len());
        }
        hit
    }

    pub async fn insert(&self, text: &str, embedding: Vec<f32>) -> Arc<Vec<f32>> {
        let value = Arc::new(embedding);
        self.entries
            .insert(CacheKey::embedding(text), Arc::clone(&value))
            .await;
        value
    }

    pub async fn invalidate_all(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks().await;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for an embedding of `text`
    pub fn embedding(text: &str) -> String {
        format!("emb:{}", text.trim())
    }
}

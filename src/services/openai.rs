use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use crate::services::{Embedder, ServiceError, TextRewriter};

/// Client for an OpenAI-compatible API
///
/// Handles the two upstream calls the engine relies on:
/// - `/embeddings` for request/provider vectors
/// - `/chat/completions` for message mediation
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    embedding_model: String,
    chat_model: String,
    temperature: f32,
    client: Client,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(
        base_url: String,
        api_key: String,
        embedding_model: String,
        chat_model: String,
        temperature: f32,
        timeout_secs: u64,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            embedding_model,
            chat_model,
            temperature,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ServiceError> {
        if self.api_key.is_empty() {
            return Err(ServiceError::NotConfigured("openai.api_key is empty".into()));
        }

        let url = self.url(path);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ServiceError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Embedder for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        let body = json!({
            "model": self.embedding_model,
            "input": text,
        });

        let raw = self.post("embeddings", body).await?;
        let embedding: Vec<f32> = raw["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| ServiceError::InvalidResponse("No embedding in response".into()))?
            .iter()
            .filter_map(|v| v.as_f64().map(|f| f as f32))
            .collect();

        if embedding.is_empty() {
            return Err(ServiceError::InvalidResponse("Empty embedding".into()));
        }

        Ok(embedding)
    }
}

#[async_trait]
impl TextRewriter for OpenAiClient {
    async fn rewrite(&self, system: &str, text: &str) -> Result<String, ServiceError> {
        let body = json!({
            "model": self.chat_model,
            "temperature": self.temperature,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": text },
            ],
        });

        let raw = self.post("chat/completions", body).await?;
        raw["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServiceError::InvalidResponse("No message content in response".into()))
    }
}

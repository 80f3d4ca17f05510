use super::AudioTextEmbedder;
use crate::config::{EmbedderConfig, DEFAULT_EMBEDDER_MODEL, DEFAULT_EMBEDDER_URL};
use async_trait::async_trait;
use base64::Engine as _;
use serde_json::json;
use std::path::Path;

/// Client for a CLAP-style embedding server.
///
/// Both modalities go to `POST {base_url}/v1/embeddings`:
/// `{"model", "modality": "text", "input": "<text>"}` or
/// `{"model", "modality": "audio", "filename", "audio_base64"}`.
/// The reply carries the vector at `data[0].embedding`.
pub struct HttpAudioEmbedder {
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub client: reqwest::Client,
}

impl HttpAudioEmbedder {
    pub fn new(model: String, base_url: String) -> Self {
        Self {
            model,
            base_url,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(cfg: &EmbedderConfig) -> Self {
        let embedder = Self::new(cfg.model.clone(), cfg.base_url.clone());
        match &cfg.api_key {
            Some(key) => embedder.with_api_key(key.clone()),
            None => embedder,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'))
    }

    async fn post(&self, body: serde_json::Value) -> anyhow::Result<Vec<f32>> {
        let url = self.url();
        crate::providers::network::check_outbound(&url)?;

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {}", key));
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "embedding API error (status {}): {}",
                status.as_u16(),
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;
        parse_embedding(&json)
    }
}

impl Default for HttpAudioEmbedder {
    fn default() -> Self {
        Self::new(
            DEFAULT_EMBEDDER_MODEL.to_string(),
            DEFAULT_EMBEDDER_URL.to_string(),
        )
    }
}

pub(crate) fn parse_embedding(json: &serde_json::Value) -> anyhow::Result<Vec<f32>> {
    let vec = json
        .pointer("/data/0/embedding")
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow::anyhow!("embedding API response missing embedding field"))?;

    vec.iter()
        .map(|x| {
            x.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| anyhow::anyhow!("embedding contains non-numeric value"))
        })
        .collect()
}

#[async_trait]
impl AudioTextEmbedder for HttpAudioEmbedder {
    async fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.post(json!({
            "model": self.model,
            "modality": "text",
            "input": text,
        }))
        .await
    }

    async fn embed_audio(&self, path: &Path) -> anyhow::Result<Vec<f32>> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.post(json!({
            "model": self.model,
            "modality": "audio",
            "filename": filename,
            "audio_base64": base64::engine::general_purpose::STANDARD.encode(bytes),
        }))
        .await
    }

    fn name(&self) -> &'static str {
        "http"
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

use async_trait::async_trait;
use std::path::Path;

pub mod fake;
pub mod http;

/// Joint audio-text embedding collaborator. Text and audio vectors must live in
/// the same space so they can be compared directly.
#[async_trait]
pub trait AudioTextEmbedder: Send + Sync {
    async fn embed_text(&self, text: &str) -> anyhow::Result<Vec<f32>>;
    async fn embed_audio(&self, path: &Path) -> anyhow::Result<Vec<f32>>;
    fn name(&self) -> &'static str;
    fn model_id(&self) -> String;
}

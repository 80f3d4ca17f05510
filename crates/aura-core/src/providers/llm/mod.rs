use crate::model::LlmResponse;
use async_trait::async_trait;

pub mod fake;
pub mod openai;
pub mod tracing;

/// Text-generation collaborator: one prompt in, one free-form completion out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse>;
    fn provider_name(&self) -> &'static str;
}

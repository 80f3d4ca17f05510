use crate::model::LlmResponse;
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a client with one `gen_ai.client.request` span per completion.
/// Prompt text is never recorded, only its length.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let provider = self.inner.provider_name();
        let span = info_span!(
            "gen_ai.client.request",
            "aura.provider" = provider,
            "aura.prompt.chars" = prompt.len(),
            "gen_ai.request.model" = tracing::field::Empty,
            "aura.reply.chars" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(prompt).await;
            let span = tracing::Span::current();

            match &result {
                Ok(resp) => {
                    span.record("gen_ai.request.model", resp.model.as_str());
                    span.record("aura.reply.chars", resp.text.len());
                    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "completion received");
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                    tracing::warn!(error = %e, "completion failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::llm::fake::FakeClient;

    #[tokio::test]
    async fn passes_through_reply_and_errors() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let inner = FakeClient::new("m".into()).with_script(["ok"]);
        let client = TracingLlmClient::new(Arc::new(inner.clone()));
        assert_eq!(client.provider_name(), "fake");

        let resp = client.complete("prompt").await.unwrap();
        assert_eq!(resp.text, "ok");
        assert!(client.complete("prompt").await.is_err());
        assert_eq!(inner.calls(), 2);
    }
}

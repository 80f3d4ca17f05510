use super::AudioTextEmbedder;
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct FakeEmbedder {
    pub model: String,
    text_calls: Arc<AtomicUsize>,
    audio_calls: Arc<AtomicUsize>,
    text_vec: Vec<f32>,
    audio_vec: Vec<f32>,
}

impl FakeEmbedder {
    pub fn new(model: &str, text_vec: Vec<f32>, audio_vec: Vec<f32>) -> Self {
        Self {
            model: model.to_string(),
            text_calls: Arc::new(AtomicUsize::new(0)),
            audio_calls: Arc::new(AtomicUsize::new(0)),
            text_vec,
            audio_vec,
        }
    }

    /// Unit vectors at the given cosine similarity.
    pub fn with_similarity(model: &str, sim: f32) -> Self {
        let sim = sim.clamp(-1.0, 1.0);
        Self::new(model, vec![1.0, 0.0], vec![sim, (1.0 - sim * sim).sqrt()])
    }

    pub fn calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst) + self.audio_calls.load(Ordering::SeqCst)
    }

    pub fn audio_calls(&self) -> usize {
        self.audio_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioTextEmbedder for FakeEmbedder {
    async fn embed_text(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.text_vec.clone())
    }

    async fn embed_audio(&self, _path: &Path) -> anyhow::Result<Vec<f32>> {
        self.audio_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.audio_vec.clone())
    }

    fn name(&self) -> &'static str {
        "fake"
    }

    fn model_id(&self) -> String {
        self.model.clone()
    }
}

use crate::providers::embedder::AudioTextEmbedder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Lower bound applied to each vector norm before dividing.
pub const COSINE_EPS: f32 = 1e-6;

/// Discrete verdict on whether the audio supports a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum EntailmentBand {
    Contradicted = -1,
    Neutral = 0,
    Entailed = 1,
}

impl EntailmentBand {
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl From<EntailmentBand> for i8 {
    fn from(b: EntailmentBand) -> i8 {
        b.value()
    }
}

impl TryFrom<i8> for EntailmentBand {
    type Error = String;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            -1 => Ok(EntailmentBand::Contradicted),
            0 => Ok(EntailmentBand::Neutral),
            1 => Ok(EntailmentBand::Entailed),
            other => Err(format!("entailment band must be -1, 0 or 1 (got {})", other)),
        }
    }
}

/// Cut-points on cosine similarity. `low <= high` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 0.25,
            high: 0.55,
        }
    }
}

impl Thresholds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn is_ordered(&self) -> bool {
        self.low <= self.high
    }

    /// Both cut-points belong to the neutral band.
    pub fn band_for(&self, sim: f64) -> EntailmentBand {
        if sim < self.low {
            EntailmentBand::Contradicted
        } else if sim <= self.high {
            EntailmentBand::Neutral
        } else {
            EntailmentBand::Entailed
        }
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> anyhow::Result<f32> {
    if a.len() != b.len() {
        anyhow::bail!("embedding dims mismatch: {} vs {}", a.len(), b.len());
    }
    if a.is_empty() {
        anyhow::bail!("cannot compare empty embeddings");
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt().max(COSINE_EPS);
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt().max(COSINE_EPS);

    Ok(dot / (norm_a * norm_b))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntailmentOutcome {
    pub band: EntailmentBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
    pub audio_found: bool,
}

/// Compares a hypothesis against audio in a joint embedding space.
#[derive(Clone)]
pub struct EntailmentClassifier {
    embedder: Arc<dyn AudioTextEmbedder>,
    thresholds: Thresholds,
}

impl EntailmentClassifier {
    pub fn new(embedder: Arc<dyn AudioTextEmbedder>, thresholds: Thresholds) -> Self {
        Self {
            embedder,
            thresholds,
        }
    }

    /// Missing audio is neutral evidence; the embedder is not called.
    pub async fn classify(
        &self,
        hypothesis: &str,
        audio: &Path,
    ) -> anyhow::Result<EntailmentOutcome> {
        if !audio.exists() {
            tracing::warn!(path = %audio.display(), "audio not found; treating as neutral");
            return Ok(EntailmentOutcome {
                band: EntailmentBand::Neutral,
                similarity: None,
                audio_found: false,
            });
        }

        let text_vec = self.embedder.embed_text(hypothesis).await?;
        let audio_vec = self.embedder.embed_audio(audio).await?;
        let similarity = cosine_similarity(&text_vec, &audio_vec)?;
        let band = self.thresholds.band_for(f64::from(similarity));

        tracing::debug!(
            similarity,
            band = band.value(),
            embedder = self.embedder.name(),
            model = %self.embedder.model_id(),
            "audio entailment"
        );
        Ok(EntailmentOutcome {
            band,
            similarity: Some(similarity),
            audio_found: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::embedder::fake::FakeEmbedder;
    use tempfile::NamedTempFile;

    #[test]
    fn band_is_a_step_function_with_inclusive_neutral_edges() {
        let t = Thresholds::default();
        assert_eq!(t.band_for(-1.0), EntailmentBand::Contradicted);
        assert_eq!(t.band_for(0.2499), EntailmentBand::Contradicted);
        assert_eq!(t.band_for(0.25), EntailmentBand::Neutral);
        assert_eq!(t.band_for(0.4), EntailmentBand::Neutral);
        assert_eq!(t.band_for(0.55), EntailmentBand::Neutral);
        assert_eq!(t.band_for(0.5501), EntailmentBand::Entailed);
        assert_eq!(t.band_for(1.0), EntailmentBand::Entailed);
    }

    #[test]
    fn band_is_monotone_in_similarity() {
        let t = Thresholds::new(-0.3, 0.3);
        let mut prev = EntailmentBand::Contradicted;
        for i in -100..=100 {
            let band = t.band_for(f64::from(i) / 100.0);
            assert!(band >= prev, "band decreased at sim={}", i);
            prev = band;
        }
    }

    #[test]
    fn equal_thresholds_leave_a_single_neutral_point() {
        let t = Thresholds::new(0.5, 0.5);
        assert_eq!(t.band_for(0.5), EntailmentBand::Neutral);
        assert_eq!(t.band_for(0.49), EntailmentBand::Contradicted);
        assert_eq!(t.band_for(0.51), EntailmentBand::Entailed);
    }

    #[test]
    fn cosine_similarity_basics() {
        let a = [1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).unwrap().abs() < 1e-6);
        assert!((cosine_similarity(&a, &[-2.0, 0.0, 0.0]).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_similarity_guards_zero_norm() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(sim, 0.0);
        assert!(sim.is_finite());
    }

    #[test]
    fn cosine_similarity_rejects_mismatched_dims() {
        let err = cosine_similarity(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("embedding dims mismatch"));
        assert!(cosine_similarity(&[], &[]).is_err());
    }

    #[test]
    fn band_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&EntailmentBand::Contradicted).unwrap(), "-1");
        assert!(serde_json::from_str::<EntailmentBand>("2").is_err());
    }

    #[tokio::test]
    async fn missing_audio_is_neutral_without_embedding() {
        let embedder = FakeEmbedder::with_similarity("fake", 0.9);
        let classifier =
            EntailmentClassifier::new(Arc::new(embedder.clone()), Thresholds::default());
        let out = classifier
            .classify("a dog barks", Path::new("/definitely/not/here.wav"))
            .await
            .unwrap();
        assert_eq!(out.band, EntailmentBand::Neutral);
        assert!(!out.audio_found);
        assert_eq!(out.similarity, None);
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn existing_audio_is_classified_by_similarity() {
        let audio = NamedTempFile::new().unwrap();
        for (sim, expected) in [
            (0.9, EntailmentBand::Entailed),
            (0.4, EntailmentBand::Neutral),
            (0.1, EntailmentBand::Contradicted),
        ] {
            let embedder = FakeEmbedder::with_similarity("fake", sim);
            let classifier =
                EntailmentClassifier::new(Arc::new(embedder.clone()), Thresholds::default());
            let out = classifier.classify("h", audio.path()).await.unwrap();
            assert_eq!(out.band, expected, "sim={}", sim);
            assert!((out.similarity.unwrap() - sim).abs() < 1e-5);
            assert_eq!(embedder.calls(), 2);
            assert_eq!(embedder.audio_calls(), 1);
        }
    }
}

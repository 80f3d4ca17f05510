use crate::config::EmbedderConfig;
use crate::entailment::{EntailmentBand, EntailmentClassifier, Thresholds};
use crate::hypothesis::HypothesisGenerator;
use crate::judge::{RubricJudge, RubricScore};
use crate::model::{AuraResult, EvaluationRequest};
use crate::providers::device::{CudaProbe, DeviceProbe};
use crate::providers::embedder::http::HttpAudioEmbedder;
use crate::providers::embedder::AudioTextEmbedder;
use crate::providers::llm::openai::OpenAIClient;
use crate::providers::llm::tracing::TracingLlmClient;
use crate::providers::llm::LlmClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionParams {
    /// Influence of the entailment band. Expected >= 0; not enforced.
    pub weight: f64,
    pub thresholds: Thresholds,
    /// Caller intent; audio-aware fusion also needs an accelerator.
    pub audio_input: bool,
}

impl FusionParams {
    pub const DEFAULT_WEIGHT: f64 = 0.1;
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            weight: Self::DEFAULT_WEIGHT,
            thresholds: Thresholds::default(),
            audio_input: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FusionMode {
    TextOnly,
    AudioAware,
}

impl FusionMode {
    /// Audio-aware only when requested AND an accelerator is present. The probe
    /// is not consulted when audio is not requested.
    pub fn select(audio_input: bool, device: &dyn DeviceProbe) -> Self {
        if audio_input && device.accelerator_available() {
            FusionMode::AudioAware
        } else {
            FusionMode::TextOnly
        }
    }
}

/// `(rubric - 1) / 2`: {1,2,3} onto {0, 0.5, 1}.
pub fn fuse_text_only(rubric: RubricScore) -> f64 {
    rubric.normalized()
}

/// `raw = norm + w * band` lies in `[-w, 1 + w]`; `(raw + w) / (1 + 2w)` maps it
/// back onto `[0, 1]`.
pub fn fuse_audio_aware(rubric: RubricScore, band: EntailmentBand, weight: f64) -> f64 {
    let band = f64::from(band.value());
    let shifted = rubric.normalized() + weight * (band + 1.0);
    (shifted / (1.0 + 2.0 * weight)).clamp(0.0, 1.0)
}

/// Orchestrates the judge, hypothesis generator and entailment classifier.
/// Each call is independent; nothing is cached between calls.
pub struct AuraScorer {
    judge: RubricJudge,
    hypotheses: HypothesisGenerator,
    embedder: Option<Arc<dyn AudioTextEmbedder>>,
    embedder_config: EmbedderConfig,
    device: Arc<dyn DeviceProbe>,
    params: FusionParams,
}

impl AuraScorer {
    pub fn new(llm: Arc<dyn LlmClient>, device: Arc<dyn DeviceProbe>) -> Self {
        Self {
            judge: RubricJudge::new(llm.clone()),
            hypotheses: HypothesisGenerator::new(llm),
            embedder: None,
            embedder_config: EmbedderConfig::default(),
            device,
            params: FusionParams::default(),
        }
    }

    pub fn with_params(mut self, params: FusionParams) -> Self {
        self.params = params;
        self
    }

    /// Shared read-only across calls. Callers sharing one handle across
    /// concurrent evaluations must know the embedder tolerates it.
    pub fn with_embedder(mut self, embedder: Arc<dyn AudioTextEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Used to build the default embedder when none was supplied.
    pub fn with_embedder_config(mut self, cfg: EmbedderConfig) -> Self {
        self.embedder_config = cfg;
        self
    }

    pub async fn score(&self, req: &EvaluationRequest) -> anyhow::Result<AuraResult> {
        if !self.params.thresholds.is_ordered() {
            tracing::warn!(
                low = self.params.thresholds.low,
                high = self.params.thresholds.high,
                "entailment thresholds are inverted"
            );
        }

        let mode = FusionMode::select(self.params.audio_input, self.device.as_ref());
        tracing::info!(?mode, device = self.device.name(), "selected fusion mode");

        match mode {
            FusionMode::TextOnly => self.run_text_only(req).await,
            FusionMode::AudioAware => self.run_audio_aware(req).await,
        }
    }

    async fn run_text_only(&self, req: &EvaluationRequest) -> anyhow::Result<AuraResult> {
        tracing::info!("audio off mode - using only rubric score");
        let rubric = self
            .judge
            .judge(&req.question, &req.reference_answer, &req.predicted_response)
            .await?;

        Ok(AuraResult {
            aura_score: fuse_text_only(rubric.score),
            mode: FusionMode::TextOnly,
            rubric,
            hypothesis: None,
            entailment: None,
        })
    }

    async fn run_audio_aware(&self, req: &EvaluationRequest) -> anyhow::Result<AuraResult> {
        let rubric = self
            .judge
            .judge(&req.question, &req.reference_answer, &req.predicted_response)
            .await?;

        let hypothesis = self
            .hypotheses
            .generate(&req.question, &req.predicted_response)
            .await?;

        let embedder = match &self.embedder {
            Some(e) => e.clone(),
            None => {
                tracing::debug!(base_url = %self.embedder_config.base_url, "building default embedder");
                Arc::new(HttpAudioEmbedder::from_config(&self.embedder_config))
            }
        };
        let classifier = EntailmentClassifier::new(embedder, self.params.thresholds);
        let entailment = classifier.classify(&hypothesis, &req.audio_reference).await?;

        let aura_score = fuse_audio_aware(rubric.score, entailment.band, self.params.weight);
        tracing::info!(
            rubric = rubric.score.value(),
            band = entailment.band.value(),
            weight = self.params.weight,
            aura_score,
            "fused score"
        );

        Ok(AuraResult {
            aura_score,
            mode: FusionMode::AudioAware,
            rubric,
            hypothesis: Some(hypothesis),
            entailment: Some(entailment),
        })
    }
}

/// One-shot entry point: OpenAI judge built from `api_key`, host CUDA probe,
/// and the supplied embedder (or the default one).
pub async fn compute_aura_score(
    req: &EvaluationRequest,
    api_key: &str,
    embedder: Option<Arc<dyn AudioTextEmbedder>>,
    params: FusionParams,
) -> anyhow::Result<AuraResult> {
    let llm: Arc<dyn LlmClient> = Arc::new(TracingLlmClient::new(Arc::new(
        OpenAIClient::with_default_model(api_key.to_string()),
    )));
    let mut scorer = AuraScorer::new(llm, Arc::new(CudaProbe)).with_params(params);
    if let Some(e) = embedder {
        scorer = scorer.with_embedder(e);
    }
    scorer.score(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::device::StaticProbe;
    use crate::providers::embedder::fake::FakeEmbedder;
    use crate::providers::network::NetworkPolicyGuard;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProbe(AtomicUsize);

    impl DeviceProbe for CountingProbe {
        fn accelerator_available(&self) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[test]
    fn mode_requires_intent_and_device() {
        assert_eq!(FusionMode::select(true, &StaticProbe(true)), FusionMode::AudioAware);
        assert_eq!(FusionMode::select(true, &StaticProbe(false)), FusionMode::TextOnly);
        assert_eq!(FusionMode::select(false, &StaticProbe(true)), FusionMode::TextOnly);
        assert_eq!(FusionMode::select(false, &StaticProbe(false)), FusionMode::TextOnly);
    }

    #[test]
    fn probe_is_skipped_without_audio_intent() {
        let probe = CountingProbe(AtomicUsize::new(0));
        FusionMode::select(false, &probe);
        assert_eq!(probe.0.load(Ordering::SeqCst), 0);
        FusionMode::select(true, &probe);
        assert_eq!(probe.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn text_only_is_exact() {
        assert_eq!(fuse_text_only(RubricScore::Incorrect), 0.0);
        assert_eq!(fuse_text_only(RubricScore::Ambiguous), 0.5);
        assert_eq!(fuse_text_only(RubricScore::Correct), 1.0);
    }

    #[test]
    fn audio_aware_worked_examples() {
        assert_eq!(
            fuse_audio_aware(RubricScore::Correct, EntailmentBand::Entailed, 0.1),
            1.0
        );
        assert_eq!(
            fuse_audio_aware(RubricScore::Incorrect, EntailmentBand::Contradicted, 0.1),
            0.0
        );
        let mid = fuse_audio_aware(RubricScore::Ambiguous, EntailmentBand::Neutral, 0.1);
        assert!((mid - 0.5).abs() < 1e-12);
    }

    #[test]
    fn audio_aware_stays_in_unit_interval() {
        for w in [0.0, 0.05, 0.1, 0.5, 1.0, 3.0, 100.0] {
            for rubric in RubricScore::ALL {
                for band in [
                    EntailmentBand::Contradicted,
                    EntailmentBand::Neutral,
                    EntailmentBand::Entailed,
                ] {
                    let s = fuse_audio_aware(rubric, band, w);
                    assert!((0.0..=1.0).contains(&s), "w={} rubric={} band={:?} -> {}", w, rubric, band, s);
                }
            }
        }
    }

    #[test]
    fn zero_weight_reduces_to_text_only() {
        for rubric in RubricScore::ALL {
            assert_eq!(
                fuse_audio_aware(rubric, EntailmentBand::Entailed, 0.0),
                fuse_text_only(rubric)
            );
        }
    }

    #[test]
    fn audio_aware_values() {
        // (0.5 + 0.1 * 2) / 1.2
        let s = fuse_audio_aware(RubricScore::Ambiguous, EntailmentBand::Entailed, 0.1);
        assert!((s - 0.7 / 1.2).abs() < 1e-12);
        // (1.0 + 0.0) / 1.2
        let s = fuse_audio_aware(RubricScore::Correct, EntailmentBand::Contradicted, 0.1);
        assert!((s - 1.0 / 1.2).abs() < 1e-12);
    }

    #[tokio::test]
    #[serial_test::serial(network)]
    async fn entry_point_propagates_judge_failure_unchanged() {
        let _guard = NetworkPolicyGuard::deny("offline");
        let embedder = Arc::new(FakeEmbedder::with_similarity("fake", 1.0));
        let shared: Arc<dyn AudioTextEmbedder> = embedder.clone();
        let req = EvaluationRequest::new("q", "r", "p", "missing.wav");
        let params = FusionParams {
            audio_input: false,
            ..Default::default()
        };

        let err = compute_aura_score(&req, "sk-test", Some(shared), params)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("outbound network blocked by policy"), "{}", msg);
        assert!(msg.contains("api.openai.com"));
        assert_eq!(embedder.calls(), 0);
    }
}

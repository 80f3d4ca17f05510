use async_trait::async_trait;
use aura_core::entailment::EntailmentBand;
use aura_core::fusion::{fuse_audio_aware, AuraScorer, FusionMode, FusionParams};
use aura_core::judge::RubricScore;
use aura_core::model::EvaluationRequest;
use aura_core::providers::device::StaticProbe;
use aura_core::providers::embedder::fake::FakeEmbedder;
use aura_core::providers::embedder::AudioTextEmbedder;
use aura_core::providers::llm::fake::FakeClient;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

struct BrokenEmbedder;

#[async_trait]
impl AudioTextEmbedder for BrokenEmbedder {
    async fn embed_text(&self, _text: &str) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("embedding API error (status 503): model loading")
    }

    async fn embed_audio(&self, _path: &Path) -> anyhow::Result<Vec<f32>> {
        anyhow::bail!("unreachable")
    }

    fn name(&self) -> &'static str {
        "broken"
    }

    fn model_id(&self) -> String {
        "broken".to_string()
    }
}

fn request(audio: &Path) -> EvaluationRequest {
    EvaluationRequest::new(
        "Can you hear a crowd cheering in the audio?",
        "A crowd can be cheering and clapping in the audio.",
        "Yes",
        audio,
    )
}

fn judge_reply(score: u8) -> String {
    format!(r#"The answer matches. {{"score": {}, "reason": "test"}}"#, score)
}

#[tokio::test]
async fn text_only_makes_one_call_and_maps_scores() {
    for (score, expected) in [(1u8, 0.0), (2, 0.5), (3, 1.0)] {
        let llm = FakeClient::new("fake".into()).with_script([judge_reply(score)]);
        let embedder = FakeEmbedder::with_similarity("fake", 0.9);
        let scorer = AuraScorer::new(Arc::new(llm.clone()), Arc::new(StaticProbe(false)))
            .with_embedder(Arc::new(embedder.clone()));

        let result = scorer.score(&request(Path::new("x.wav"))).await.unwrap();
        assert_eq!(result.mode, FusionMode::TextOnly);
        assert_eq!(result.aura_score, expected);
        assert!(result.hypothesis.is_none());
        assert_eq!(llm.calls(), 1);
        assert_eq!(embedder.calls(), 0);
    }
}

#[tokio::test]
async fn audio_intent_off_forces_text_only_even_with_device() {
    let llm = FakeClient::new("fake".into()).with_script([judge_reply(2)]);
    let scorer = AuraScorer::new(Arc::new(llm.clone()), Arc::new(StaticProbe(true))).with_params(
        FusionParams {
            audio_input: false,
            ..Default::default()
        },
    );
    let result = scorer.score(&request(Path::new("x.wav"))).await.unwrap();
    assert_eq!(result.mode, FusionMode::TextOnly);
    assert_eq!(result.aura_score, 0.5);
    assert_eq!(llm.calls(), 1);
}

#[tokio::test]
async fn audio_aware_runs_judge_then_hypothesis_then_embedding() {
    let audio = NamedTempFile::new().unwrap();
    let llm = FakeClient::new("fake".into())
        .with_script([judge_reply(3), "A crowd is cheering.".to_string()]);
    let embedder = FakeEmbedder::with_similarity("fake", 0.8);
    let scorer = AuraScorer::new(Arc::new(llm.clone()), Arc::new(StaticProbe(true)))
        .with_embedder(Arc::new(embedder.clone()));

    let result = scorer.score(&request(audio.path())).await.unwrap();
    assert_eq!(result.mode, FusionMode::AudioAware);
    assert_eq!(result.rubric.score, RubricScore::Correct);
    assert_eq!(result.hypothesis.as_deref(), Some("A crowd is cheering."));
    let ent = result.entailment.unwrap();
    assert_eq!(ent.band, EntailmentBand::Entailed);
    assert!(ent.audio_found);
    assert_eq!(result.aura_score, 1.0);

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].starts_with("You are given a question"));
    assert!(prompts[1].contains("Question: Can you hear a crowd cheering in the audio?\nResponse: Yes\nHypothesis:"));
    assert_eq!(embedder.calls(), 2);
}

#[tokio::test]
async fn contradicted_incorrect_answer_scores_zero() {
    let audio = NamedTempFile::new().unwrap();
    let llm = FakeClient::new("fake".into())
        .with_script([judge_reply(1), "Silence.".to_string()]);
    let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(true)))
        .with_embedder(Arc::new(FakeEmbedder::with_similarity("fake", -0.2)));

    let result = scorer.score(&request(audio.path())).await.unwrap();
    assert_eq!(result.entailment.unwrap().band, EntailmentBand::Contradicted);
    assert_eq!(result.aura_score, 0.0);
}

#[tokio::test]
async fn missing_audio_scores_as_neutral_band() {
    for (score, rubric) in [
        (1u8, RubricScore::Incorrect),
        (2, RubricScore::Ambiguous),
        (3, RubricScore::Correct),
    ] {
        for w in [0.0, 0.1, 0.7] {
            let llm = FakeClient::new("fake".into())
                .with_script([judge_reply(score), "h".to_string()]);
            let embedder = FakeEmbedder::with_similarity("fake", 0.99);
            let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(true)))
                .with_embedder(Arc::new(embedder.clone()))
                .with_params(FusionParams {
                    weight: w,
                    ..Default::default()
                });

            let result = scorer
                .score(&request(Path::new("/no/such/audio.wav")))
                .await
                .unwrap();
            let expected = fuse_audio_aware(rubric, EntailmentBand::Neutral, w);
            assert_eq!(result.aura_score, expected);
            assert!(!result.entailment.unwrap().audio_found);
            assert_eq!(embedder.calls(), 0);
        }
    }
}

#[tokio::test]
async fn unparsable_judgment_defaults_conservatively() {
    let llm = FakeClient::new("fake".into()).with_script(["I cannot determine this."]);
    let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(false)));
    let result = scorer.score(&request(Path::new("x.wav"))).await.unwrap();
    assert_eq!(result.rubric.score, RubricScore::Incorrect);
    assert_eq!(result.aura_score, 0.0);
}

#[tokio::test]
async fn judge_failure_is_fatal() {
    // No reply configured: the fake client errors on the first call.
    let llm = FakeClient::new("fake".into());
    let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(false)));
    assert!(scorer.score(&request(Path::new("x.wav"))).await.is_err());
}

#[tokio::test]
async fn embedder_failure_is_fatal_and_unmodified() {
    let audio = NamedTempFile::new().unwrap();
    let llm = FakeClient::new("fake".into()).with_script([judge_reply(3), "h".to_string()]);
    let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(true)))
        .with_embedder(Arc::new(BrokenEmbedder));

    let err = scorer.score(&request(audio.path())).await.unwrap_err();
    assert_eq!(err.to_string(), "embedding API error (status 503): model loading");
}

#[tokio::test]
async fn result_serializes_with_score_and_breakdown() {
    let audio = NamedTempFile::new().unwrap();
    let llm = FakeClient::new("fake".into()).with_script([judge_reply(2), "h".to_string()]);
    let scorer = AuraScorer::new(Arc::new(llm), Arc::new(StaticProbe(true)))
        .with_embedder(Arc::new(FakeEmbedder::with_similarity("fake", 0.4)));

    let result = scorer.score(&request(audio.path())).await.unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!((json["aura_score"].as_f64().unwrap() - 0.5).abs() < 1e-12);
    assert_eq!(json["mode"], "audio_aware");
    assert_eq!(json["rubric"]["score"], 2);
    assert_eq!(json["rubric"]["strategy"], "structured");
    assert_eq!(json["entailment"]["band"], 0);
}

use crate::cli::args::{DeviceArg, EmbedderArgs, JudgeArgs, ScoreArgs};
use aura_core::config::{load_config, AuraConfig, DeviceSetting, DEFAULT_CONFIG_FILE};
use aura_core::providers::device::{probe_for, DeviceProbe};
use aura_core::providers::embedder::fake::FakeEmbedder;
use aura_core::providers::llm::fake::FakeClient;
use aura_core::providers::llm::openai::OpenAIClient;
use aura_core::providers::llm::tracing::TracingLlmClient;
use aura_core::providers::llm::LlmClient;
use aura_core::AuraScorer;
use std::path::Path;
use std::sync::Arc;

/// File (explicit, or ./aura.yaml when present) then flag overrides, validated last.
pub(crate) fn resolve_config(args: &ScoreArgs) -> anyhow::Result<AuraConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(Path::new(DEFAULT_CONFIG_FILE))?,
        None => AuraConfig::default(),
    };

    if let Some(w) = args.weight {
        cfg.weight = w;
    }
    if let Some(lo) = args.thresh_low {
        cfg.thresh_low = lo;
    }
    if let Some(hi) = args.thresh_high {
        cfg.thresh_high = hi;
    }
    if args.no_audio {
        cfg.audio_input = false;
    }
    if let Some(device) = args.device {
        cfg.device = match device {
            DeviceArg::Auto => DeviceSetting::Auto,
            DeviceArg::Off => DeviceSetting::Off,
        };
    }
    if let Some(provider) = &args.judge.judge {
        cfg.judge.provider = provider.clone();
    }
    if let Some(model) = &args.judge.judge_model {
        cfg.judge.model = model.clone();
    }
    if let Some(provider) = &args.embedder.embedder {
        cfg.embedder.provider = provider.clone();
    }
    if let Some(url) = &args.embedder.embedder_url {
        cfg.embedder.base_url = url.clone();
    }
    if let Some(model) = &args.embedder.embedder_model {
        cfg.embedder.model = model.clone();
    }
    if let Some(key) = args
        .embedder
        .embedder_api_key
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
    {
        cfg.embedder.api_key = Some(key.to_string());
    }

    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn build_llm(cfg: &AuraConfig, args: &JudgeArgs) -> anyhow::Result<Arc<dyn LlmClient>> {
    let inner: Arc<dyn LlmClient> = match cfg.judge.provider.as_str() {
        "openai" => {
            let key = args
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "invalid args: OPENAI_API_KEY is not set (pass --api-key or use --judge fake)"
                    )
                })?;
            Arc::new(
                OpenAIClient::new(cfg.judge.model.clone(), key.to_string())
                    .with_sampling(cfg.judge.temperature, cfg.judge.max_tokens),
            )
        }
        "fake" => Arc::new(
            FakeClient::new(cfg.judge.model.clone())
                .with_script([args.fake_reply.clone(), args.fake_hypothesis.clone()])
                .with_response(args.fake_reply.clone()),
        ),
        other => anyhow::bail!("invalid args: unknown judge provider: {}", other),
    };
    Ok(Arc::new(TracingLlmClient::new(inner)))
}

pub(crate) fn build_scorer(
    cfg: &AuraConfig,
    llm: Arc<dyn LlmClient>,
    embedder_args: &EmbedderArgs,
) -> anyhow::Result<AuraScorer> {
    let device: Arc<dyn DeviceProbe> = probe_for(cfg.device);
    let scorer = AuraScorer::new(llm, device)
        .with_params(cfg.fusion_params())
        .with_embedder_config(cfg.embedder.clone());

    // The http embedder is built on demand, only when audio-aware fusion runs.
    match cfg.embedder.provider.as_str() {
        "http" => Ok(scorer),
        "fake" => Ok(scorer.with_embedder(Arc::new(FakeEmbedder::with_similarity(
            &cfg.embedder.model,
            embedder_args.fake_similarity,
        )))),
        other => anyhow::bail!("invalid args: unknown embedder provider: {}", other),
    }
}

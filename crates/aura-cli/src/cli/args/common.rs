//! Shared argument types.

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum DeviceArg {
    Auto,
    Off,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct JudgeArgs {
    /// Text-generation provider for the rubric judge and hypothesis generator
    /// - openai: live calls (needs OPENAI_API_KEY)
    /// - fake: fixed replies (tests/dev)
    #[arg(long, env = "AURA_JUDGE")]
    pub judge: Option<String>,

    /// Judge model identifier. Default: gpt-4o
    #[arg(long, env = "AURA_JUDGE_MODEL")]
    pub judge_model: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Judge reply used by --judge fake
    #[arg(long, default_value = r#"{"score": 3, "reason": "fake judge"}"#)]
    pub fake_reply: String,

    /// Hypothesis reply used by --judge fake
    #[arg(long, default_value = "The audio matches the response.")]
    pub fake_hypothesis: String,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct EmbedderArgs {
    /// Audio-text embedding provider: http | fake
    #[arg(long, env = "AURA_EMBEDDER")]
    pub embedder: Option<String>,

    /// Base URL of the embedding server (http provider)
    #[arg(long, env = "AURA_EMBEDDER_URL")]
    pub embedder_url: Option<String>,

    #[arg(long)]
    pub embedder_model: Option<String>,

    /// Bearer token for the embedding server (overrides embedder.api_key)
    #[arg(long, env = "AURA_EMBEDDER_API_KEY", hide_env_values = true)]
    pub embedder_api_key: Option<String>,

    /// Cosine similarity reported by --embedder fake
    #[arg(long, default_value_t = 1.0)]
    pub fake_similarity: f32,
}

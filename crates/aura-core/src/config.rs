use crate::entailment::Thresholds;
use crate::errors::ConfigError;
use crate::fusion::FusionParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "aura.yaml";

pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o";
pub const DEFAULT_EMBEDDER_MODEL: &str = "clap-2023";
pub const DEFAULT_EMBEDDER_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuraConfig {
    pub version: u32,
    /// Influence of the entailment band on the fused score.
    pub weight: f64,
    pub thresh_low: f64,
    pub thresh_high: f64,
    pub audio_input: bool,
    pub judge: JudgeConfig,
    pub embedder: EmbedderConfig,
    pub device: DeviceSetting,
}

impl Default for AuraConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            version: SUPPORTED_CONFIG_VERSION,
            weight: FusionParams::DEFAULT_WEIGHT,
            thresh_low: thresholds.low,
            thresh_high: thresholds.high,
            audio_input: true,
            judge: JudgeConfig::default(),
            embedder: EmbedderConfig::default(),
            device: DeviceSetting::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JudgeConfig {
    /// "openai" or "fake"
    pub provider: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: DEFAULT_JUDGE_MODEL.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedderConfig {
    /// "http" or "fake"
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Sent as a bearer token when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: "http".to_string(),
            model: DEFAULT_EMBEDDER_MODEL.to_string(),
            base_url: DEFAULT_EMBEDDER_URL.to_string(),
            api_key: None,
        }
    }
}

impl std::fmt::Debug for EmbedderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSetting {
    /// Probe the host for an accelerator.
    #[default]
    Auto,
    /// Report no accelerator; always text-only.
    Off,
}

impl AuraConfig {
    pub fn fusion_params(&self) -> FusionParams {
        FusionParams {
            weight: self.weight,
            thresholds: Thresholds::new(self.thresh_low, self.thresh_high),
            audio_input: self.audio_input,
        }
    }

    /// File-sourced configuration is checked; `FusionParams` built in code is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "weight must be a finite value >= 0 (got {})",
                self.weight
            )));
        }
        for (name, v) in [("thresh_low", self.thresh_low), ("thresh_high", self.thresh_high)] {
            if !(-1.0..=1.0).contains(&v) {
                return Err(ConfigError::Invalid(format!(
                    "{} must lie in [-1, 1] (got {})",
                    name, v
                )));
            }
        }
        if self.thresh_low > self.thresh_high {
            return Err(ConfigError::Invalid(format!(
                "thresh_low {} > thresh_high {}",
                self.thresh_low, self.thresh_high
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<AuraConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: AuraConfig = serde_yaml::from_str(&raw)?;
    cfg.validate()?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

pub const SAMPLE_CONFIG: &str = r#"version: 1
# Influence of audio entailment on the final score.
weight: 0.1
thresh_low: 0.25
thresh_high: 0.55
audio_input: true
device: auto
judge:
  provider: openai
  model: gpt-4o
embedder:
  provider: http
  model: clap-2023
  base_url: http://127.0.0.1:8080
"#;

pub fn write_sample_config(path: &Path) -> Result<(), ConfigError> {
    std::fs::write(path, SAMPLE_CONFIG).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

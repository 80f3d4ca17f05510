use std::path::PathBuf;

/// Configuration load/validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorKind {
    MissingConfig,
    ConfigParse,
    InvalidArgs,
    ProviderAuth,
    ProviderRateLimit,
    ProviderTimeout,
    ProviderServer,
    Network,
    Other,
}

impl RunErrorKind {
    pub fn is_provider_failure(self) -> bool {
        matches!(
            self,
            RunErrorKind::ProviderAuth
                | RunErrorKind::ProviderRateLimit
                | RunErrorKind::ProviderTimeout
                | RunErrorKind::ProviderServer
                | RunErrorKind::Network
        )
    }
}

/// Classified view of an evaluation failure, used by front-ends to pick an exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: RunErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub provider: Option<String>,
}

impl RunError {
    pub fn new(kind: RunErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            provider: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn from_status(status: u16, provider: Option<&str>, message: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => RunErrorKind::ProviderAuth,
            408 => RunErrorKind::ProviderTimeout,
            429 => RunErrorKind::ProviderRateLimit,
            500..=599 => RunErrorKind::ProviderServer,
            _ => RunErrorKind::Other,
        };
        let mut err = Self::new(kind, message).with_status(status);
        if let Some(provider) = provider {
            err = err.with_provider(provider);
        }
        err
    }

    pub fn classify_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let msg = message.to_lowercase();

        let kind = if msg.contains("blocked by policy") {
            RunErrorKind::Network
        } else if msg.contains("config file not found") {
            RunErrorKind::MissingConfig
        } else if msg.contains("invalid argument") || msg.contains("invalid args") {
            RunErrorKind::InvalidArgs
        } else if msg.contains("config error")
            || msg.contains("invalid config")
            || msg.contains("failed to parse yaml")
            || msg.contains("unsupported config version")
        {
            RunErrorKind::ConfigParse
        } else if msg.contains("401") || msg.contains("403") || msg.contains("unauthorized") {
            RunErrorKind::ProviderAuth
        } else if msg.contains("rate limit") || msg.contains("429") {
            RunErrorKind::ProviderRateLimit
        } else if msg.contains("timeout") || msg.contains("timed out") {
            RunErrorKind::ProviderTimeout
        } else if msg.contains("500")
            || msg.contains("502")
            || msg.contains("503")
            || msg.contains("504")
            || msg.contains("api error")
        {
            RunErrorKind::ProviderServer
        } else if msg.contains("network") || msg.contains("connection") || msg.contains("dns") {
            RunErrorKind::Network
        } else {
            RunErrorKind::Other
        };

        Self::new(kind, message)
    }

    /// Typed errors first, free-form message second.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(cfg) = err.downcast_ref::<ConfigError>() {
            let kind = match cfg {
                ConfigError::NotFound { .. } => RunErrorKind::MissingConfig,
                _ => RunErrorKind::ConfigParse,
            };
            return Self::new(kind, cfg.to_string());
        }

        if let Some(http) = err.downcast_ref::<reqwest::Error>() {
            if http.is_timeout() {
                return Self::new(RunErrorKind::ProviderTimeout, http.to_string());
            }
            if let Some(status) = http.status() {
                return Self::from_status(status.as_u16(), None, http.to_string());
            }
            if http.is_connect() || http.is_request() {
                return Self::new(RunErrorKind::Network, http.to_string());
            }
        }

        Self::classify_message(format!("{:#}", err))
    }
}

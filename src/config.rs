//! Game configuration loaded from TOML.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::llm_client::{DEFAULT_TIMEOUT, LlmClient, LlmConfig, LlmProvider};
use crate::settings::{AppSettings, Theme};
use crate::word_source::WordSource;

/// Configuration for the game and its word generator.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ForcaConfig {
    /// LLM provider (gemini, openai or anthropic).
    #[serde(default)]
    llm_provider: LlmProvider,

    /// LLM model name. Defaults per provider when absent.
    #[serde(default)]
    llm_model: Option<String>,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    llm_temperature: f32,

    /// Alternative API root for the provider.
    #[serde(default)]
    llm_base_url: Option<String>,

    /// Seconds before a word request is abandoned for a fallback word.
    #[serde(default = "default_timeout_secs")]
    llm_timeout_secs: u64,

    /// Milliseconds between the sixth miss and the loss.
    #[serde(default = "default_loss_delay_ms")]
    loss_delay_ms: u64,

    /// Starting color theme.
    #[serde(default)]
    theme: Theme,

    /// Start in low-performance mode (no animations).
    #[serde(default)]
    low_performance: bool,
}

#[instrument]
fn default_max_tokens() -> u32 {
    512
}

#[instrument]
fn default_temperature() -> f32 {
    1.0
}

#[instrument]
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

#[instrument]
fn default_loss_delay_ms() -> u64 {
    500
}

/// Default model for a provider.
#[instrument]
pub fn default_model(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Gemini => "gemini-2.5-flash",
        LlmProvider::OpenAI => "gpt-4o-mini",
        LlmProvider::Anthropic => "claude-3-5-haiku-20241022",
    }
}

impl Default for ForcaConfig {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::default(),
            llm_model: None,
            llm_max_tokens: default_max_tokens(),
            llm_temperature: default_temperature(),
            llm_base_url: None,
            llm_timeout_secs: default_timeout_secs(),
            loss_delay_ms: default_loss_delay_ms(),
            theme: Theme::default(),
            low_performance: false,
        }
    }
}

impl ForcaConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(provider = ?config.llm_provider, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    #[instrument(skip(path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Model to request, falling back to the provider default.
    #[instrument(skip(self))]
    pub fn model(&self) -> &str {
        self.llm_model
            .as_deref()
            .unwrap_or_else(|| default_model(self.llm_provider))
    }

    /// Loss delay as a duration.
    #[instrument(skip(self))]
    pub fn loss_delay(&self) -> Duration {
        Duration::from_millis(self.loss_delay_ms)
    }

    /// Starting application settings.
    #[instrument(skip(self))]
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            theme: self.theme,
            low_performance: self.low_performance,
        }
    }

    /// Creates LLM configuration from this config.
    ///
    /// Reads the API key from the provider's environment variable
    /// (`GEMINI_API_KEY` or `API_KEY`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`).
    #[instrument(skip(self), fields(provider = ?self.llm_provider))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let vars = self.llm_provider.api_key_vars();
        let api_key = vars
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                ConfigError::new(format!("{} environment variable not set", vars.join(" or ")))
            })?;

        let config = LlmConfig::new(
            self.llm_provider,
            api_key,
            self.model().to_string(),
            self.llm_max_tokens,
            self.llm_temperature,
        )
        .with_timeout(Duration::from_secs(self.llm_timeout_secs));
        Ok(match &self.llm_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        })
    }

    /// Builds the word source, offline when no API key is available.
    #[instrument(skip(self))]
    pub fn word_source(&self) -> WordSource {
        match self.create_llm_config() {
            Ok(llm) => WordSource::new(LlmClient::new(llm)),
            Err(e) => {
                warn!(error = %e, "Word generator unavailable, fallback words only");
                WordSource::offline()
            }
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

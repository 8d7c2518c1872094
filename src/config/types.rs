//! Core configuration types for code conversion
//!
//! This module contains the `ConverterConfig` struct and the model catalogue
//! types that tell the conversion pipeline which backends exist and how to
//! reach them.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use crate::utils::{
    ANTHROPIC_BASE_URL, CLAUDE_MODEL, DEEPSEEK_BASE_URL, DEEPSEEK_MODEL, GEMINI_BASE_URL,
    GEMINI_MODEL, GROQ_BASE_URL, GROQ_MODEL, OPENAI_BASE_URL, OPENAI_MODEL,
};

/// Wire protocol spoken by a model backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provider {
    /// `POST {base_url}/chat/completions` with `stream: true`
    OpenAiCompatible { base_url: String },
    /// `POST {base_url}/messages` with `stream: true`
    Anthropic { base_url: String },
    /// `POST {base_url}/models/{model}:streamGenerateContent?alt=sse`
    Gemini { base_url: String },
}

impl Provider {
    #[must_use]
    pub fn base_url(&self) -> &str {
        match self {
            Provider::OpenAiCompatible { base_url }
            | Provider::Anthropic { base_url }
            | Provider::Gemini { base_url } => base_url,
        }
    }

    /// Same protocol pointed at a different host (test servers, proxies)
    #[must_use]
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        match self {
            Provider::OpenAiCompatible { .. } => Provider::OpenAiCompatible { base_url },
            Provider::Anthropic { .. } => Provider::Anthropic { base_url },
            Provider::Gemini { .. } => Provider::Gemini { base_url },
        }
    }
}

/// One selectable model in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// User-facing selector, e.g. "GPT" or "Claude"
    pub name: String,
    pub provider: Provider,
    /// Provider-side model identifier
    pub model_id: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl ModelSpec {
    pub fn new(
        name: impl Into<String>,
        provider: Provider,
        model_id: impl Into<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            model_id: model_id.into(),
            api_key_env: api_key_env.into(),
        }
    }

    /// Read the API key from the environment
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                model: self.name.clone(),
                env_var: self.api_key_env.clone(),
            })
    }
}

/// The five models offered out of the box
#[must_use]
pub fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new(
            "GPT",
            Provider::OpenAiCompatible {
                base_url: OPENAI_BASE_URL.into(),
            },
            OPENAI_MODEL,
            "OPENAI_API_KEY",
        ),
        ModelSpec::new(
            "Claude",
            Provider::Anthropic {
                base_url: ANTHROPIC_BASE_URL.into(),
            },
            CLAUDE_MODEL,
            "ANTHROPIC_API_KEY",
        ),
        ModelSpec::new(
            "DeepSeek",
            Provider::OpenAiCompatible {
                base_url: DEEPSEEK_BASE_URL.into(),
            },
            DEEPSEEK_MODEL,
            "DEEPSEEK_API_KEY",
        ),
        ModelSpec::new(
            "Gemini",
            Provider::Gemini {
                base_url: GEMINI_BASE_URL.into(),
            },
            GEMINI_MODEL,
            "GOOGLE_API_KEY",
        ),
        ModelSpec::new(
            "GROQ",
            Provider::OpenAiCompatible {
                base_url: GROQ_BASE_URL.into(),
            },
            GROQ_MODEL,
            "GROQ_API_KEY",
        ),
    ]
}

/// Main configuration struct for conversion and execution
///
/// Fields missing from a JSON file fall back to the builder defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Languages offered as conversion source and target
    pub(crate) languages: Vec<String>,
    pub(crate) models: Vec<ModelSpec>,
    /// Sampling temperature, 0.0 to 2.0
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,
    /// Whole-request timeout for one streaming conversion
    pub(crate) request_timeout_secs: u64,
    /// Compile plus run timeout for one snippet
    pub(crate) execution_timeout_secs: u64,
}

impl ConverterConfig {
    /// Load and validate a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` on malformed JSON, or any validation error
    /// `build()` would return.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), models = config.models.len(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ConverterConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

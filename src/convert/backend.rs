//! Model backend abstraction
//!
//! A backend turns one prompt into a stream of text fragments. Fragments are
//! deltas: the pipeline owns accumulation, progress and cleanup.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::BoxStream;

use crate::config::{ConfigError, ModelSpec, Provider};
use crate::utils::{DEFAULT_MAX_TOKENS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE};

use super::anthropic::AnthropicBackend;
use super::gemini::GeminiBackend;
use super::openai::OpenAiBackend;

/// Error types for model backends
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Provider answered with a non-2xx status
    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS or body transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error event delivered inside the stream
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Sampling and transport settings for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Streaming text generator behind a model selector
pub trait ModelBackend: Send + Sync {
    /// Provider-side model identifier, for logs
    fn name(&self) -> &str;

    /// Start generating; the stream yields text deltas in order
    fn stream(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> BoxStream<'static, Result<String, BackendError>>;
}

/// Build the HTTP adapter for a catalogue entry
///
/// # Errors
///
/// Returns `ConfigError::MissingApiKey` when the model's key variable is unset.
pub fn build_backend(
    spec: &ModelSpec,
    client: reqwest::Client,
) -> Result<Arc<dyn ModelBackend>, ConfigError> {
    let api_key = spec.api_key()?;
    let backend: Arc<dyn ModelBackend> = match &spec.provider {
        Provider::OpenAiCompatible { base_url } => Arc::new(OpenAiBackend::new(
            client,
            base_url.clone(),
            spec.model_id.clone(),
            api_key,
        )),
        Provider::Anthropic { base_url } => Arc::new(AnthropicBackend::new(
            client,
            base_url.clone(),
            spec.model_id.clone(),
            api_key,
        )),
        Provider::Gemini { base_url } => Arc::new(GeminiBackend::new(
            client,
            base_url.clone(),
            spec.model_id.clone(),
            api_key,
        )),
    };
    Ok(backend)
}

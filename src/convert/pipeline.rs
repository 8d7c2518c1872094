//! Conversion pipeline
//!
//! validate source -> render prompt -> stream model -> clean -> (Python) prepare.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, GenerationOptions, ModelBackend, build_backend};
use super::clean::{clean_response, prepare_python_code};
use super::prompt::render_prompt;
use crate::config::{ConfigError, ConverterConfig};
use crate::language::LanguageDetector;

/// Progress callback: cumulative response text and a fraction in `[0, 0.99]`
pub type ProgressFn<'a> = dyn FnMut(&str, f32) + Send + 'a;

/// Error types for conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Unsupported model selected: {0}")]
    UnsupportedModel(String),

    /// Model is in the catalogue but its API key is missing
    #[error("Model {model} is unavailable: set the {env_var} environment variable")]
    ModelUnavailable { model: String, env_var: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// One conversion job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub code: String,
    pub source: String,
    pub target: String,
    /// Model selector name, e.g. "GPT"
    pub model: String,
    /// Overrides the configured temperature for this request
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ConversionRequest {
    pub fn new(
        code: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            source: source.into(),
            target: target.into(),
            model: model.into(),
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn is_complete(&self) -> bool {
        !(self.code.trim().is_empty()
            || self.source.trim().is_empty()
            || self.target.trim().is_empty()
            || self.model.trim().is_empty())
    }
}

/// Result of a conversion that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Cleaned target-language code
    Converted(String),
    /// Source failed validation; holds the explanation
    Rejected(String),
    /// A required parameter was empty; nothing was sent
    Skipped,
}

impl ConversionOutcome {
    /// Text shown to the user in place of converted code
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            ConversionOutcome::Converted(text) | ConversionOutcome::Rejected(text) => text,
            ConversionOutcome::Skipped => String::new(),
        }
    }
}

/// `min(0.99, 1 - 1/(1 + 0.1*i))` for the i-th fragment
#[must_use]
pub fn progress_fraction(index: usize) -> f32 {
    let i = index as f32;
    (1.0 - 1.0 / (1.0 + 0.1 * i)).min(0.99)
}

enum BackendSlot {
    Ready(Arc<dyn ModelBackend>),
    MissingKey { env_var: String },
}

/// Orchestrates validation, model streaming and cleanup
pub struct Converter {
    detector: LanguageDetector,
    /// keyed by lowercased selector name
    backends: HashMap<String, (String, BackendSlot)>,
    options: GenerationOptions,
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut models: Vec<&str> = self.backends.values().map(|(n, _)| n.as_str()).collect();
        models.sort_unstable();
        f.debug_struct("Converter")
            .field("models", &models)
            .field("options", &self.options)
            .finish()
    }
}

impl Converter {
    #[must_use]
    pub fn new(detector: LanguageDetector, options: GenerationOptions) -> Self {
        Self {
            detector,
            backends: HashMap::new(),
            options,
        }
    }

    /// Wire every catalogue model to its HTTP adapter
    ///
    /// Models whose API key is missing stay selectable but fail with
    /// [`ConvertError::ModelUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config fails validation.
    pub fn from_config(config: &ConverterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let options = GenerationOptions {
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            timeout: config.request_timeout(),
        };
        let client = reqwest::Client::new();
        let mut converter = Self::new(LanguageDetector::default(), options);

        for spec in config.models() {
            let slot = match build_backend(spec, client.clone()) {
                Ok(backend) => BackendSlot::Ready(backend),
                Err(ConfigError::MissingApiKey { env_var, .. }) => {
                    tracing::warn!(model = %spec.name, %env_var, "API key not set, model unavailable");
                    BackendSlot::MissingKey { env_var }
                }
                Err(e) => return Err(e),
            };
            converter
                .backends
                .insert(spec.name.to_lowercase(), (spec.name.clone(), slot));
        }

        Ok(converter)
    }

    /// Register (or replace) a backend under a selector name
    #[must_use]
    pub fn with_backend(mut self, name: impl Into<String>, backend: Arc<dyn ModelBackend>) -> Self {
        let name = name.into();
        self.backends
            .insert(name.to_lowercase(), (name, BackendSlot::Ready(backend)));
        self
    }

    #[must_use]
    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    #[must_use]
    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Selector names of all registered models, sorted
    #[must_use]
    pub fn models(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.backends.values().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    fn backend(&self, model: &str) -> Result<&Arc<dyn ModelBackend>, ConvertError> {
        match self.backends.get(&model.trim().to_lowercase()) {
            Some((_, BackendSlot::Ready(backend))) => Ok(backend),
            Some((name, BackendSlot::MissingKey { env_var })) => {
                Err(ConvertError::ModelUnavailable {
                    model: name.clone(),
                    env_var: env_var.clone(),
                })
            }
            None => Err(ConvertError::UnsupportedModel(model.to_string())),
        }
    }

    /// Run one conversion
    ///
    /// # Errors
    ///
    /// Returns `ConvertError` for an unknown or unavailable model, or when the
    /// backend fails before or during streaming.
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        mut progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<ConversionOutcome, ConvertError> {
        if !request.is_complete() {
            tracing::warn!("Missing required parameters, skipping conversion");
            return Ok(ConversionOutcome::Skipped);
        }

        tracing::info!(
            source = %request.source,
            target = %request.target,
            model = %request.model,
            code_len = request.code.len(),
            "Starting conversion"
        );

        let validation = self.detector.validate(&request.code, &request.source);
        if !validation.is_valid() {
            return Ok(ConversionOutcome::Rejected(validation.explanation()));
        }

        let backend = self.backend(&request.model)?;
        let prompt = render_prompt(&request.source, &request.target, &request.code);

        let mut options = self.options;
        if let Some(temperature) = request.temperature {
            options.temperature = temperature;
        }

        let mut fragments = backend.stream(&prompt, &options);
        let mut response = String::new();
        let mut index = 0usize;
        while let Some(fragment) = fragments.next().await {
            let fragment = fragment.inspect_err(|e| {
                tracing::error!(model = %backend.name(), error = %e, "Model stream failed");
            })?;
            response.push_str(&fragment);
            if let Some(callback) = progress.as_deref_mut() {
                callback(&response, progress_fraction(index));
            }
            index += 1;
        }
        tracing::debug!(fragments = index, response_len = response.len(), "Stream finished");

        let mut converted = clean_response(&response);
        if self
            .detector
            .registry()
            .resolve(&request.target)
            .is_some_and(|l| l.name() == "Python")
        {
            converted = prepare_python_code(&converted);
        }

        tracing::info!(output_len = converted.len(), "Conversion completed");
        Ok(ConversionOutcome::Converted(converted))
    }

    /// String-only view of [`Converter::convert`]: errors become messages
    pub async fn convert_text(&self, request: &ConversionRequest) -> String {
        match self.convert(request, None).await {
            Ok(outcome) => outcome.into_text(),
            Err(ConvertError::UnsupportedModel(model)) => {
                tracing::error!(%model, "Unsupported model selected");
                "Unsupported model selected".to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, "Error during conversion");
                format!("Error during conversion: {e}")
            }
        }
    }
}

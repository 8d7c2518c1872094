//! Fluent setters for `ConverterConfigBuilder`

use super::builder::ConverterConfigBuilder;
use super::types::ModelSpec;

impl ConverterConfigBuilder {
    /// Replace the conversion language list
    #[must_use]
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the whole model catalogue
    #[must_use]
    pub fn models(mut self, models: Vec<ModelSpec>) -> Self {
        self.models = models;
        self
    }

    /// Add one model, replacing any entry with the same name
    #[must_use]
    pub fn model(mut self, model: ModelSpec) -> Self {
        self.models
            .retain(|m| !m.name.eq_ignore_ascii_case(&model.name));
        self.models.push(model);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn execution_timeout_secs(mut self, secs: u64) -> Self {
        self.execution_timeout_secs = secs;
        self
    }
}

//! Getter methods for `ConverterConfig`

use std::time::Duration;

use super::types::{ConverterConfig, ModelSpec};

impl ConverterConfig {
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn models(&self) -> &[ModelSpec] {
        &self.models
    }

    /// Look up a model by selector name (case-insensitive)
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&ModelSpec> {
        let name = name.trim();
        self.models.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }
}

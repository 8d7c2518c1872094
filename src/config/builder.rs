//! Builder for `ConverterConfig`
//!
//! Every field has a default, so `ConverterConfig::builder().build()` yields
//! the stock configuration. `build()` validates ranges once so the rest of
//! the crate can trust the values.

use std::collections::HashSet;

use super::errors::ConfigError;
use super::types::{ConverterConfig, ModelSpec, default_models};
use crate::utils::{
    DEFAULT_CONVERSION_LANGUAGES, DEFAULT_EXECUTION_TIMEOUT_SECS, DEFAULT_MAX_TOKENS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE, TEMPERATURE_RANGE,
};

pub struct ConverterConfigBuilder {
    pub(crate) languages: Vec<String>,
    pub(crate) models: Vec<ModelSpec>,
    pub(crate) temperature: f32,
    pub(crate) max_tokens: u32,
    pub(crate) request_timeout_secs: u64,
    pub(crate) execution_timeout_secs: u64,
}

impl Default for ConverterConfigBuilder {
    fn default() -> Self {
        Self {
            languages: DEFAULT_CONVERSION_LANGUAGES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            models: default_models(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            execution_timeout_secs: DEFAULT_EXECUTION_TIMEOUT_SECS,
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        let builder = ConverterConfigBuilder::default();
        ConverterConfig {
            languages: builder.languages,
            models: builder.models,
            temperature: builder.temperature,
            max_tokens: builder.max_tokens,
            request_timeout_secs: builder.request_timeout_secs,
            execution_timeout_secs: builder.execution_timeout_secs,
        }
    }
}

impl ConverterConfig {
    /// Create a builder for configuring a `ConverterConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder::default()
    }

    /// Check every range constraint
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = TEMPERATURE_RANGE;
        if !(min..=max).contains(&self.temperature) {
            return Err(ConfigError::TemperatureOutOfRange {
                value: self.temperature,
                min,
                max,
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "request_timeout_secs",
            });
        }
        if self.execution_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout {
                field: "execution_timeout_secs",
            });
        }
        if self.languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        if self.models.is_empty() {
            return Err(ConfigError::NoModels);
        }

        let mut seen = HashSet::new();
        for model in &self.models {
            if !seen.insert(model.name.to_lowercase()) {
                return Err(ConfigError::DuplicateModel(model.name.clone()));
            }
        }

        Ok(())
    }
}

impl ConverterConfigBuilder {
    /// Validate and produce the config
    ///
    /// # Errors
    ///
    /// See [`ConverterConfig::validate`].
    pub fn build(self) -> Result<ConverterConfig, ConfigError> {
        let config = ConverterConfig {
            languages: self.languages,
            models: self.models,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            request_timeout_secs: self.request_timeout_secs,
            execution_timeout_secs: self.execution_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConverterConfig::builder().build().unwrap();
        assert_eq!(config, ConverterConfig::default());
        assert_eq!(config.languages.len(), 6);
        assert_eq!(config.models.len(), 5);
    }

    #[test]
    fn test_temperature_bounds_inclusive() {
        assert!(ConverterConfig::builder().temperature(0.0).build().is_ok());
        assert!(ConverterConfig::builder().temperature(2.0).build().is_ok());
        assert!(matches!(
            ConverterConfig::builder().temperature(2.01).build(),
            Err(ConfigError::TemperatureOutOfRange { .. })
        ));
        assert!(ConverterConfig::builder().temperature(f32::NAN).build().is_err());
    }

    #[test]
    fn test_duplicate_model_names_case_insensitive() {
        let mut models = default_models();
        let mut dup = models[0].clone();
        dup.name = "gpt".into();
        models.push(dup);
        assert!(matches!(
            ConverterConfig::builder().models(models).build(),
            Err(ConfigError::DuplicateModel(name)) if name == "gpt"
        ));
    }
}

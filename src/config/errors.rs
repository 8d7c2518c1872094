//! Error types for configuration loading and validation

use std::path::PathBuf;

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `ConverterConfig`
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Temperature {value} is outside the accepted range {min}..={max}")]
    TemperatureOutOfRange { value: f32, min: f32, max: f32 },

    #[error("max_tokens must be greater than zero")]
    ZeroMaxTokens,

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("At least one conversion language is required")]
    NoLanguages,

    #[error("At least one model is required")]
    NoModels,

    /// Two catalogue entries share a selector name
    #[error("Duplicate model name '{0}'")]
    DuplicateModel(String),

    /// The model's API key variable is unset or blank
    #[error("API key for {model} not found; set the {env_var} environment variable")]
    MissingApiKey { model: String, env_var: String },
}

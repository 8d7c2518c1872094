//! Configuration module for code conversion
//!
//! This module provides the `ConverterConfig` struct, its builder, and the
//! model catalogue, with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod errors;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::ConverterConfigBuilder;
pub use errors::ConfigError;
pub use types::{ConverterConfig, ModelSpec, Provider, default_models};

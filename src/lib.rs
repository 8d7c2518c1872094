//! Code conversion between programming languages through LLM backends,
//! with heuristic language detection and local snippet execution.

pub mod config;
pub mod convert;
pub mod execution;
pub mod language;
pub mod utils;

pub use config::{ConfigError, ConverterConfig, ModelSpec, Provider};
pub use convert::{
    BackendError, ConversionOutcome, ConversionRequest, ConvertError, Converter,
    GenerationOptions, ModelBackend,
};
pub use execution::{ExecutionDispatcher, ExecutionError, ExecutionOutput, ExecutionReport};
pub use language::{
    Language, LanguageDetector, LanguageRegistry, Validation, detect_language, validate_language,
};

//! Shared configuration constants for codexchange
//!
//! Default values used by the config builder, model backends and execution
//! toolchains, kept in one place to avoid magic numbers.

/// Default sampling temperature for conversions
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Accepted temperature range (inclusive)
pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 2.0);

/// Default response token cap for a single conversion
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Default timeout for one streaming model request
///
/// Long enough for a few thousand tokens from the slower providers.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default timeout for compiling plus running one snippet
pub const DEFAULT_EXECUTION_TIMEOUT_SECS: u64 = 30;

/// Languages offered as conversion sources and targets
pub const DEFAULT_CONVERSION_LANGUAGES: &[&str] =
    &["Python", "Julia", "JavaScript", "Go", "Java", "C++"];

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Anthropic API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const CLAUDE_MODEL: &str = "claude-3-sonnet-20240307";
pub const DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const GROQ_MODEL: &str = "llama3-70b-8192";

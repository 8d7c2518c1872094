//! Code conversion through streaming language-model backends

pub mod anthropic;
pub mod backend;
pub mod clean;
pub mod gemini;
pub mod openai;
pub mod pipeline;
pub mod prompt;
pub mod sse;

pub use anthropic::AnthropicBackend;
pub use backend::{BackendError, GenerationOptions, ModelBackend, build_backend};
pub use clean::{clean_response, prepare_python_code};
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;
pub use pipeline::{
    ConversionOutcome, ConversionRequest, ConvertError, Converter, ProgressFn, progress_fraction,
};
pub use prompt::render_prompt;
pub use sse::{SseDecoder, SseEvent};

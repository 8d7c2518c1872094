//! OpenAI-compatible chat completions (GPT, DeepSeek, GROQ)

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, GenerationOptions, ModelBackend};
use super::sse::{SseEvent, fragment_stream, parse_event};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn extract_delta(event: &SseEvent) -> Result<Option<String>, BackendError> {
    let Some(chunk) = parse_event::<ChatChunk>(event) else {
        return Ok(None);
    };
    if let Some(error) = chunk.error {
        return Err(BackendError::Provider(error.message));
    }
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content))
}

pub struct OpenAiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiBackend {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: String, model: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            model,
            api_key,
        }
    }
}

impl ModelBackend for OpenAiBackend {
    fn name(&self) -> &str {
        &self.model
    }

    fn stream(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> BoxStream<'static, Result<String, BackendError>> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };
        tracing::debug!(%url, model = %self.model, "Starting chat completion stream");

        let request = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body);
        fragment_stream(request, options.timeout, extract_delta)
    }
}

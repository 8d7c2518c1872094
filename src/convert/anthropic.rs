//! Anthropic messages API (Claude)

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, GenerationOptions, ModelBackend};
use super::sse::{SseEvent, fragment_stream, parse_event};
use crate::utils::ANTHROPIC_VERSION;

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [Message<'a>; 1],
    stream: bool,
}

/// Only the event types that carry text or errors are modelled
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    ContentBlockDelta { delta: BlockDelta },
    Error { error: ApiError },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockDelta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn extract_text(event: &SseEvent) -> Result<Option<String>, BackendError> {
    match parse_event::<StreamEvent>(event) {
        Some(StreamEvent::ContentBlockDelta {
            delta: BlockDelta::TextDelta { text },
        }) => Ok(Some(text)),
        Some(StreamEvent::Error { error }) => Err(BackendError::Provider(error.message)),
        _ => Ok(None),
    }
}

pub struct AnthropicBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnthropicBackend {
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

impl ModelBackend for AnthropicBackend {
    fn name(&self) -> &str {
        &self.model
    }

    fn stream(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> BoxStream<'static, Result<String, BackendError>> {
        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: options.max_tokens,
            // Anthropic caps temperature at 1.0
            temperature: options.temperature.min(1.0),
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };
        tracing::debug!(%url, model = %self.model, "Starting messages stream");

        let request = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        fragment_stream(request, options.timeout, extract_text)
    }
}

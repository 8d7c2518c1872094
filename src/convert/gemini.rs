//! Gemini `streamGenerateContent` with `alt=sse`

use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use super::backend::{BackendError, GenerationOptions, ModelBackend};
use super::sse::{SseEvent, fragment_stream, parse_event};

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

fn extract_text(event: &SseEvent) -> Result<Option<String>, BackendError> {
    let Some(chunk) = parse_event::<GenerateChunk>(event) else {
        return Ok(None);
    };
    if let Some(error) = chunk.error {
        return Err(BackendError::Provider(error.message));
    }

    let text: String = chunk
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok((!text.is_empty()).then_some(text))
}

pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
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

impl ModelBackend for GeminiBackend {
    fn name(&self) -> &str {
        &self.model
    }

    fn stream(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> BoxStream<'static, Result<String, BackendError>> {
        let url = format!(
            "{}/models/{}:streamGenerateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                top_p: 1.0,
                top_k: 1,
                max_output_tokens: options.max_tokens,
            },
        };
        tracing::debug!(%url, model = %self.model, "Starting generateContent stream");

        let request = self
            .client
            .post(url)
            .query(&[("alt", "sse")])
            .header("x-goog-api-key", &self.api_key)
            .json(&body);
        fragment_stream(request, options.timeout, extract_text)
    }
}

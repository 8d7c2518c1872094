//! HTTP adapters against a mock server speaking each provider's SSE dialect

use std::sync::Arc;
use std::time::Duration;

use kodegen_tools_codexchange::convert::{
    AnthropicBackend, BackendError, ConversionOutcome, ConversionRequest, Converter,
    GeminiBackend, GenerationOptions, ModelBackend, OpenAiBackend,
};
use kodegen_tools_codexchange::language::LanguageDetector;
use mockito::{Matcher, Server};
use serde_json::json;

mod common;
use common::snippets::JS_FUNCTION;
use common::{collect_stream, sse_body};

fn ok_texts(items: Vec<Result<String, BackendError>>) -> Vec<String> {
    items.into_iter().map(|item| item.unwrap()).collect()
}

#[tokio::test]
async fn test_openai_compatible_stream() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "stream": true,
            "max_tokens": 4000,
            "messages": [{"role": "user", "content": "say hi"}]
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&[
            r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
            r#"{"choices":[{"delta":{"content":"Hel"}}]}"#,
            r#"{"choices":[{"delta":{"content":"lo"}}]}"#,
            "[DONE]",
        ]))
        .create_async()
        .await;

    let backend = OpenAiBackend::new(
        reqwest::Client::new(),
        server.url(),
        "gpt-4o-mini".into(),
        "test-key".into(),
    );
    let items = collect_stream(backend.stream("say hi", &GenerationOptions::default())).await;

    assert_eq!(ok_texts(items), vec!["Hel", "lo"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_anthropic_stream_reads_text_deltas() {
    let mut server = Server::new_async().await;
    let body = concat!(
        "event: message_start\n",
        "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\"}}\n\n",
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"fn \"}}\n\n",
        "event: ping\n",
        "data: {\"type\":\"ping\"}\n\n",
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"main\"}}\n\n",
        "event: message_stop\n",
        "data: {\"type\":\"message_stop\"}\n\n",
    );
    let mock = server
        .mock("POST", "/messages")
        .match_header("x-api-key", "anthropic-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-3-sonnet-20240307",
            "stream": true
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let backend = AnthropicBackend::new(
        reqwest::Client::new(),
        server.url(),
        "claude-3-sonnet-20240307".into(),
        "anthropic-key".into(),
    );
    let items = collect_stream(backend.stream("prompt", &GenerationOptions::default())).await;

    assert_eq!(ok_texts(items), vec!["fn ", "main"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_stream_uses_sse_alt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            Matcher::Regex(r"^/models/gemini-1\.5-flash:streamGenerateContent".into()),
        )
        .match_query(Matcher::UrlEncoded("alt".into(), "sse".into()))
        .match_header("x-goog-api-key", "gemini-key")
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": {"maxOutputTokens": 4000, "topK": 1}
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&[
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"package "}]}}]}"#,
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"main"}]}}]}"#,
            r#"{"usageMetadata":{"totalTokenCount":12}}"#,
        ]))
        .create_async()
        .await;

    let backend = GeminiBackend::new(
        reqwest::Client::new(),
        server.url(),
        "gemini-1.5-flash".into(),
        "gemini-key".into(),
    );
    let items = collect_stream(backend.stream("prompt", &GenerationOptions::default())).await;

    assert_eq!(ok_texts(items), vec!["package ", "main"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_maps_to_status_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let backend = OpenAiBackend::new(
        reqwest::Client::new(),
        server.url(),
        "deepseek-chat".into(),
        "key".into(),
    );
    let items = collect_stream(backend.stream("prompt", &GenerationOptions::default())).await;

    assert_eq!(items.len(), 1);
    match &items[0] {
        Err(BackendError::Status { status, body }) => {
            assert_eq!(*status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_events_are_skipped() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&[
            "{broken",
            r#"{"choices":[{"delta":{"content":"ok"}}]}"#,
        ]))
        .create_async()
        .await;

    let backend = OpenAiBackend::new(
        reqwest::Client::new(),
        server.url(),
        "llama3-70b-8192".into(),
        "key".into(),
    );
    let items = collect_stream(backend.stream("prompt", &GenerationOptions::default())).await;
    assert_eq!(ok_texts(items), vec!["ok"]);
}

#[tokio::test]
async fn test_connection_failure_is_http_error() {
    // nothing listens on the discard port
    let backend = OpenAiBackend::new(
        reqwest::Client::new(),
        "http://127.0.0.1:9".into(),
        "gpt-4o-mini".into(),
        "key".into(),
    );
    let options = GenerationOptions {
        timeout: Duration::from_secs(5),
        ..GenerationOptions::default()
    };
    let items = collect_stream(backend.stream("prompt", &options)).await;

    assert_eq!(items.len(), 1);
    assert!(matches!(
        items[0],
        Err(BackendError::Http(_)) | Err(BackendError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_full_conversion_over_http() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_body(&[
            r#"{"choices":[{"delta":{"content":"```python\n"}}]}"#,
            r#"{"choices":[{"delta":{"content":"def foo():\n    return 1\n"}}]}"#,
            r#"{"choices":[{"delta":{"content":"foo()\n```"}}]}"#,
            "[DONE]",
        ]))
        .create_async()
        .await;

    let backend = OpenAiBackend::new(
        reqwest::Client::new(),
        server.url(),
        "gpt-4o-mini".into(),
        "key".into(),
    );
    let converter = Converter::new(LanguageDetector::default(), GenerationOptions::default())
        .with_backend("GPT", Arc::new(backend));

    let request = ConversionRequest::new(JS_FUNCTION, "JavaScript", "Python", "GPT");
    let outcome = converter.convert(&request, None).await.unwrap();
    assert_eq!(
        outcome,
        ConversionOutcome::Converted("def foo():\n    return 1\nprint(foo())\n".into())
    );
}

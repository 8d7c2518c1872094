//! Server-sent events decoding for streaming model responses
//!
//! All three provider protocols deliver their deltas as SSE `data:` lines.
//! [`SseDecoder`] is a pure byte-to-event decoder; [`fragment_stream`] glues
//! it to a `reqwest` response and a provider-specific extractor.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::backend::BackendError;
use crate::utils::preview;

/// Sentinel that ends OpenAI-compatible streams
const DONE_SENTINEL: &str = "[DONE]";

/// Max characters of an error body kept in `BackendError::Status`
const ERROR_BODY_CHARS: usize = 1000;

/// One dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Value of the `event:` field, if any
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
}

/// Incremental SSE decoder
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// sequences split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every event it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw[..raw.len() - 1]).into_owned();
            if let Some(event) = self.process_line(line.trim_end_matches('\r')) {
                events.push(event);
            }
        }
        events
    }

    /// Flush a trailing event not terminated by a blank line
    pub fn finish(&mut self) -> Option<SseEvent> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&rest).into_owned();
            if let Some(event) = self.process_line(line.trim_end_matches('\r')) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        // comment / keep-alive
        if line.starts_with(':') {
            return None;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        if self.data.is_empty() {
            self.event = None;
            return None;
        }
        Some(SseEvent {
            event: self.event.take(),
            data: std::mem::take(&mut self.data).join("\n"),
        })
    }
}

/// Turns one provider event into a text delta
///
/// `Ok(None)` skips the event (metadata, pings, malformed JSON).
pub(crate) type Extractor = fn(&SseEvent) -> Result<Option<String>, BackendError>;

/// Parse an event payload, logging and skipping malformed JSON
pub(crate) fn parse_event<T: DeserializeOwned>(event: &SseEvent) -> Option<T> {
    match serde_json::from_str(&event.data) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!(error = %e, data = %preview(&event.data, 120), "Skipping malformed event");
            None
        }
    }
}

pub(crate) fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> BackendError {
    if error.is_timeout() {
        BackendError::Timeout(timeout)
    } else {
        BackendError::Http(error)
    }
}

/// Send `request` and stream the text deltas `extract` finds in its events
pub(crate) fn fragment_stream(
    request: RequestBuilder,
    timeout: Duration,
    extract: Extractor,
) -> BoxStream<'static, Result<String, BackendError>> {
    let connect = async move {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %preview(&body, 200),
                "Model request rejected"
            );
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: preview(&body, ERROR_BODY_CHARS),
            });
        }

        Ok(decode(response.bytes_stream().boxed(), timeout, extract))
    };

    stream::once(connect).try_flatten().boxed()
}

struct DecodeState<S> {
    body: S,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, BackendError>>,
    finished: bool,
    timeout: Duration,
    extract: Extractor,
}

impl<S> DecodeState<S> {
    fn extract_all(&mut self, events: impl IntoIterator<Item = SseEvent>) {
        for event in events {
            if event.data.trim() == DONE_SENTINEL {
                self.finished = true;
                return;
            }
            match (self.extract)(&event) {
                Ok(Some(text)) if !text.is_empty() => self.pending.push_back(Ok(text)),
                Ok(_) => {}
                Err(e) => {
                    self.pending.push_back(Err(e));
                    self.finished = true;
                    return;
                }
            }
        }
    }
}

fn decode<S, B>(
    body: S,
    timeout: Duration,
    extract: Extractor,
) -> impl Stream<Item = Result<String, BackendError>> + Send + 'static
where
    S: Stream<Item = reqwest::Result<B>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let state = DecodeState {
        body,
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
        timeout,
        extract,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let events = state.decoder.push(chunk.as_ref());
                    state.extract_all(events);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    let error = map_reqwest_error(e, state.timeout);
                    return Some((Err(error), state));
                }
                None => {
                    let last = state.decoder.finish();
                    state.extract_all(last);
                    state.finished = true;
                }
            }
        }
    })
}

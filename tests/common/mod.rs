//! Test utilities shared by the codexchange integration tests

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use futures::stream::BoxStream;
use kodegen_tools_codexchange::convert::{BackendError, GenerationOptions, ModelBackend};
use tracing_subscriber::EnvFilter;

/// Route crate logs at debug level into the test harness output
///
/// Installing a subscriber makes every `tracing` field expression evaluate, so
/// tests calling this also cover the logging paths.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("kodegen_tools_codexchange=debug"))
        .with_test_writer()
        .try_init();
}

/// Canonical snippets whose classification is pinned by the scenario tests
#[allow(dead_code)]
pub mod snippets {
    pub const PYTHON_FUNCTION: &str = "def foo():\n    return 1";
    pub const JS_FUNCTION: &str = "function foo() { return 1; }";
    pub const JAVA_MAIN: &str = "public class Foo {\n    public static void main(String[] args) {\n        System.out.println(\"hi\");\n    }\n}";
    pub const JULIA_STRUCT: &str = "struct Foo\n    bar\nend\nprintln(Foo(1))\nlabel:";
}

/// In-memory backend replaying a fixed list of fragments
#[allow(dead_code)]
#[derive(Default, Clone)]
pub struct ScriptedBackend {
    fragments: Vec<String>,
    fail_with: Option<String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub options: Arc<Mutex<Vec<GenerationOptions>>>,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Yield the fragments, then fail with a provider error
    pub fn failing(fragments: &[&str], message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new(fragments)
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn stream(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> BoxStream<'static, Result<String, BackendError>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.options.lock().unwrap().push(*options);

        let mut items: Vec<Result<String, BackendError>> =
            self.fragments.iter().cloned().map(Ok).collect();
        if let Some(message) = &self.fail_with {
            items.push(Err(BackendError::Provider(message.clone())));
        }
        futures::stream::iter(items).boxed()
    }
}

/// Build an SSE body from `data:` payloads
#[allow(dead_code)]
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {payload}\n\n"))
        .collect()
}

/// Drain a backend stream into its items
#[allow(dead_code)]
pub async fn collect_stream(
    stream: BoxStream<'static, Result<String, BackendError>>,
) -> Vec<Result<String, BackendError>> {
    stream.collect().await
}

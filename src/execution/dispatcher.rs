//! Validated routing of snippets to toolchains
//!
//! Code is checked against its declared language before anything is
//! written to disk or spawned, so a mislabeled snippet never reaches the
//! wrong compiler.

use std::collections::HashMap;
use std::time::Duration;

use super::errors::ExecutionError;
use super::toolchain::{ExecutionOutput, Toolchain};
use crate::config::ConverterConfig;
use crate::language::{Language, LanguageDetector};
use crate::utils::DEFAULT_EXECUTION_TIMEOUT_SECS;

/// User-facing result of [`ExecutionDispatcher::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub text: String,
    pub artifact: Option<Vec<u8>>,
}

impl ExecutionReport {
    fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            artifact: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionDispatcher {
    detector: LanguageDetector,
    toolchains: HashMap<Language, Toolchain>,
    timeout: Duration,
}

impl Default for ExecutionDispatcher {
    fn default() -> Self {
        Self::new(
            LanguageDetector::default(),
            Duration::from_secs(DEFAULT_EXECUTION_TIMEOUT_SECS),
        )
    }
}

impl ExecutionDispatcher {
    /// Dispatcher with the stock toolchain for every language that has one
    #[must_use]
    pub fn new(detector: LanguageDetector, timeout: Duration) -> Self {
        let toolchains = detector
            .registry()
            .iter()
            .filter_map(|entry| {
                Toolchain::for_language(entry).map(|toolchain| (entry.language(), toolchain))
            })
            .collect();

        Self {
            detector,
            toolchains,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(LanguageDetector::default(), config.execution_timeout())
    }

    /// Register or replace the toolchain for a language name or alias
    ///
    /// Names the registry does not know are ignored with a warning.
    #[must_use]
    pub fn with_toolchain(mut self, language: &str, toolchain: Toolchain) -> Self {
        match self.detector.registry().resolve(language) {
            Some(language) => {
                self.toolchains.insert(language, toolchain);
            }
            None => tracing::warn!(language, "Unknown language, toolchain not registered"),
        }
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Languages that can be executed, sorted by name
    #[must_use]
    pub fn supported_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.toolchains.keys().copied().collect();
        languages.sort_unstable();
        languages
    }

    /// Run `code` with `language`'s toolchain under the configured timeout
    ///
    /// Performs no validation; see [`ExecutionDispatcher::run`].
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError` if building or running fails or times out.
    /// Returns `None` when no toolchain is registered for `language`.
    pub async fn execute(
        &self,
        code: &str,
        language: Language,
    ) -> Option<Result<ExecutionOutput, ExecutionError>> {
        let toolchain = self.toolchains.get(&language)?;
        let result = match tokio::time::timeout(self.timeout, toolchain.run(code)).await {
            Ok(result) => result,
            Err(_) => Err(ExecutionError::Timeout(self.timeout)),
        };
        Some(result)
    }

    /// Validate, execute and render the outcome as display text
    pub async fn run(&self, code: &str, language: &str) -> ExecutionReport {
        tracing::info!(language, code_len = code.len(), "Starting code execution");

        if code.trim().is_empty() {
            tracing::warn!("No code provided for execution");
            return ExecutionReport::message("No code to execute.");
        }

        let validation = self.detector.validate(code, language);
        if !validation.is_valid() {
            return ExecutionReport::message(format!(
                "⚠️ Error: Cannot execute code.\n{}",
                validation.explanation()
            ));
        }

        let Some(resolved) = self.detector.registry().resolve(language) else {
            tracing::error!(language, "No toolchain for language");
            return ExecutionReport::message(format!("Execution not implemented for {language}"));
        };

        match self.execute(code, resolved).await {
            None => {
                tracing::error!(language, "No toolchain for language");
                ExecutionReport::message(format!("Execution not implemented for {language}"))
            }
            Some(Ok(output)) => {
                let secs = output.elapsed.as_secs_f64();
                tracing::info!(
                    language = %resolved,
                    elapsed_secs = secs,
                    output_len = output.stdout.len(),
                    artifact_len = output.artifact.as_ref().map_or(0, Vec::len),
                    "Execution completed"
                );
                ExecutionReport {
                    text: format!("{}\nExecution completed in {secs:.2} seconds", output.stdout),
                    artifact: output.artifact,
                }
            }
            Some(Err(e)) => {
                tracing::error!(language = %resolved, error = %e, "Execution failed");
                ExecutionReport::message(format!("Error: {e}"))
            }
        }
    }
}

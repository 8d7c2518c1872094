//! Language detection and validation
//!
//! Two-stage classification:
//! 1. Predicate pass: every registered language is tested independently and
//!    the matching ones form the match set.
//! 2. Disambiguation pass (only with two or more candidates): signatures and
//!    boosters add to each candidate's score and the highest score wins.
//!
//! Ties on the highest score go to the lexically smallest language name, so
//! the outcome never depends on registry construction order.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::registry::{Language, LanguageRegistry, SIGNATURE_WEIGHT};

/// Candidate languages and their scores for one classification call.
/// Ordered by name, which is also the tie-break order.
pub type MatchSet = BTreeMap<Language, i32>;

/// Outcome of checking code against a declared language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The declared language's predicate matched, or there was nothing to check
    Valid,
    /// The declared language's predicate did not match
    Mismatch {
        /// Best guess at the actual language
        detected: Option<Language>,
        expected: Language,
    },
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// User-facing explanation, empty when valid
    #[must_use]
    pub fn explanation(&self) -> String {
        match self {
            Validation::Valid => String::new(),
            Validation::Mismatch { .. } => self.to_string(),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (bool, String) {
        (self.is_valid(), self.explanation())
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Valid => Ok(()),
            Validation::Mismatch { detected, expected } => write!(
                f,
                "Code appears to be {} but {} was selected",
                detected.map_or("unknown", |l| l.name()),
                expected
            ),
        }
    }
}

/// Heuristic classifier over a fixed language registry
///
/// Stateless apart from the shared, immutable registry: every call builds its
/// own match set, so one detector can serve any number of concurrent callers.
#[derive(Clone)]
pub struct LanguageDetector {
    registry: Arc<LanguageRegistry>,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(LanguageRegistry::builtin())
    }
}

impl fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageDetector")
            .field("languages", &self.registry.len())
            .finish()
    }
}

impl LanguageDetector {
    #[must_use]
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Every language whose predicate matches, each with score 0
    #[must_use]
    pub fn matching_languages(&self, code: &str) -> MatchSet {
        self.registry
            .iter()
            .filter(|entry| entry.matches(code))
            .map(|entry| (entry.language(), 0))
            .collect()
    }

    /// Detect the language of `code`
    ///
    /// Returns `None` for empty input or when no predicate matches.
    #[must_use]
    pub fn detect(&self, code: &str) -> Option<Language> {
        self.detect_scored(code).first().map(|(language, _)| *language)
    }

    /// Candidates ranked by score (descending), ties by name (ascending)
    ///
    /// A single candidate is returned unscored: boosters only run when there
    /// is something to disambiguate.
    #[must_use]
    pub fn detect_scored(&self, code: &str) -> Vec<(Language, i32)> {
        if code.is_empty() {
            return Vec::new();
        }

        let mut matches = self.matching_languages(code);
        if matches.len() > 1 {
            self.disambiguate(code, &mut matches);
        }

        let mut ranked: Vec<(Language, i32)> = matches.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        if let Some((winner, score)) = ranked.first() {
            tracing::debug!(
                language = %winner,
                score,
                candidates = ranked.len(),
                "Language detected"
            );
        }

        ranked
    }

    fn disambiguate(&self, code: &str, matches: &mut MatchSet) {
        for (language, score) in matches.iter_mut() {
            let Some(entry) = self.registry.get(*language) else {
                continue;
            };
            if entry.signature_matches(code) {
                *score += SIGNATURE_WEIGHT;
            }
            *score += entry.booster_score(code);
        }
    }

    /// Check that `code` looks like `expected`
    ///
    /// Permissive: empty code and unknown language names pass. A direct
    /// predicate match always passes, whatever `detect` would return.
    #[must_use]
    pub fn validate(&self, code: &str, expected: &str) -> Validation {
        tracing::debug!(expected, code_len = code.len(), "Validating code language");

        if code.is_empty() || expected.trim().is_empty() {
            tracing::warn!("Empty code or language not specified, skipping validation");
            return Validation::Valid;
        }

        let Some(entry) = self
            .registry
            .resolve(expected)
            .and_then(|language| self.registry.get(language))
        else {
            tracing::warn!(expected, "No detector registered for language, skipping validation");
            return Validation::Valid;
        };

        if entry.matches(code) {
            tracing::debug!(language = %entry.language(), "Code validated");
            return Validation::Valid;
        }

        let result = Validation::Mismatch {
            detected: self.detect(code),
            expected: entry.language(),
        };
        tracing::error!(error = %result, "Language validation failed");
        result
    }
}

/// Detect with the built-in registry
#[must_use]
pub fn detect_language(code: &str) -> Option<Language> {
    LanguageDetector::default().detect(code)
}

/// Validate with the built-in registry
#[must_use]
pub fn validate_language(code: &str, expected: &str) -> Validation {
    LanguageDetector::default().validate(code, expected)
}

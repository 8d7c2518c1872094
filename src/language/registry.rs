//! Language registry
//!
//! Pattern tables from [`super::patterns`] compiled once into `RegexSet`s.
//! The registry is immutable after construction and shared across callers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet, RegexSetBuilder};
use serde::Serialize;

use super::patterns::ALL_LANGUAGES;

// ============================================================================
// Static definitions
// ============================================================================

/// A disambiguation pattern with its score contribution
pub struct Booster {
    pub pattern: &'static str,
    pub weight: i32,
}

impl Booster {
    pub const fn new(pattern: &'static str, weight: i32) -> Self {
        Self { pattern, weight }
    }
}

/// Complete definition for one language
pub struct LanguageDefinition {
    /// Canonical display name, also the tie-break key
    pub name: &'static str,
    /// Alternate spellings accepted by [`LanguageRegistry::resolve`]
    pub aliases: &'static [&'static str],
    /// Source file extension, without the dot
    pub extension: &'static str,
    /// Detection predicate: matches if ANY marker matches
    pub markers: &'static [&'static str],
    /// When non-empty, ANY of these must also match
    pub requires: &'static [&'static str],
    pub case_insensitive: bool,
    /// Uniqueness signal, worth [`SIGNATURE_WEIGHT`] when it matches
    pub signature: &'static str,
    pub boosters: &'static [Booster],
}

/// Score added when a candidate's signature matches
pub const SIGNATURE_WEIGHT: i32 = 2;

// ============================================================================
// Language identifier
// ============================================================================

/// Opaque identifier of a registered language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Language(&'static str);

impl Language {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.0
    }
}

// ============================================================================
// Compiled entries
// ============================================================================

/// Pre-compiled patterns for one language
/// Uses RegexSet for the any-of predicate, individual Regex for scoring
pub struct CompiledLanguage {
    language: Language,
    extension: &'static str,
    markers: RegexSet,
    requires: Option<RegexSet>,
    signature: Regex,
    boosters: Vec<(Regex, i32)>,
}

impl CompiledLanguage {
    pub fn compile(def: &LanguageDefinition) -> Result<Self, regex::Error> {
        let markers = RegexSetBuilder::new(def.markers)
            .case_insensitive(def.case_insensitive)
            .build()?;

        let requires = if def.requires.is_empty() {
            None
        } else {
            Some(
                RegexSetBuilder::new(def.requires)
                    .case_insensitive(def.case_insensitive)
                    .build()?,
            )
        };

        let boosters = def
            .boosters
            .iter()
            .map(|b| Regex::new(b.pattern).map(|re| (re, b.weight)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            language: Language(def.name),
            extension: def.extension,
            markers,
            requires,
            signature: Regex::new(def.signature)?,
            boosters,
        })
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    /// The detection predicate
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        self.markers.is_match(code) && self.requires.as_ref().is_none_or(|r| r.is_match(code))
    }

    #[must_use]
    pub fn signature_matches(&self, code: &str) -> bool {
        self.signature.is_match(code)
    }

    /// Sum of weights of every booster that matches, each counted once
    #[must_use]
    pub fn booster_score(&self, code: &str) -> i32 {
        self.boosters
            .iter()
            .filter(|(re, _)| re.is_match(code))
            .map(|(_, weight)| *weight)
            .sum()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Fixed set of languages the classifier knows about
pub struct LanguageRegistry {
    languages: Vec<CompiledLanguage>,
    /// lowercased name or alias -> index into `languages`
    lookup: HashMap<String, usize>,
}

/// Pre-compiled registry for all built-in languages (compiled once at first use)
static BUILTIN: Lazy<Arc<LanguageRegistry>> = Lazy::new(|| {
    Arc::new(
        LanguageRegistry::from_definitions(ALL_LANGUAGES)
            .expect("Invalid regex patterns in language definition"),
    )
});

impl LanguageRegistry {
    pub fn from_definitions(definitions: &[&LanguageDefinition]) -> Result<Self, regex::Error> {
        let mut languages = Vec::with_capacity(definitions.len());
        let mut lookup = HashMap::new();

        for def in definitions {
            let index = languages.len();
            languages.push(CompiledLanguage::compile(def)?);
            lookup.insert(def.name.to_lowercase(), index);
            for alias in def.aliases {
                lookup.entry(alias.to_lowercase()).or_insert(index);
            }
        }

        Ok(Self { languages, lookup })
    }

    /// The process-wide built-in registry
    #[must_use]
    pub fn builtin() -> Arc<LanguageRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Map a display name or alias (case-insensitive) to a registered language
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Language> {
        self.lookup
            .get(&name.trim().to_lowercase())
            .map(|&i| self.languages[i].language)
    }

    #[must_use]
    pub fn get(&self, language: Language) -> Option<&CompiledLanguage> {
        self.lookup
            .get(&language.name().to_lowercase())
            .map(|&i| &self.languages[i])
    }

    /// Entries in registry order
    pub fn iter(&self) -> impl Iterator<Item = &CompiledLanguage> {
        self.languages.iter()
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.iter().map(CompiledLanguage::language)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.languages()).finish()
    }
}

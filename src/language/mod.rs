//! Programming language classification for code snippets
//!
//! Fast, explainable regex heuristics rather than parsing: one predicate per
//! registered language, plus uniqueness signals consulted only when several
//! predicates match the same snippet.

pub mod detector;
pub mod patterns;
pub mod registry;

pub use detector::{LanguageDetector, MatchSet, Validation, detect_language, validate_language};
pub use registry::{CompiledLanguage, Language, LanguageDefinition, LanguageRegistry};

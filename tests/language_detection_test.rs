//! Classifier scenarios and properties against the built-in registry

use kodegen_tools_codexchange::language::{
    LanguageDetector, LanguageRegistry, Validation, detect_language, validate_language,
};
use proptest::prelude::*;

mod common;
use common::snippets::*;

fn name_of(code: &str) -> Option<&'static str> {
    detect_language(code).map(|l| l.name())
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_empty_input_detects_nothing() {
    assert_eq!(detect_language(""), None);
    assert!(LanguageDetector::default().detect_scored("").is_empty());
}

#[test]
fn test_python_function_validates_as_python() {
    let result = validate_language(PYTHON_FUNCTION, "Python");
    assert_eq!(result, Validation::Valid);
    assert_eq!(result.into_parts(), (true, String::new()));
}

#[test]
fn test_javascript_function_wins_lexical_tie() {
    let detector = LanguageDetector::default();
    let ranked: Vec<(&str, i32)> = detector
        .detect_scored(JS_FUNCTION)
        .into_iter()
        .map(|(l, s)| (l.name(), s))
        .collect();

    // JavaScript and Lua tie on the signature; name order decides
    assert_eq!(ranked, vec![("JavaScript", 2), ("Lua", 2), ("PHP", 0)]);
    assert_eq!(name_of(JS_FUNCTION), Some("JavaScript"));
}

#[test]
fn test_python_block_header_beats_lua() {
    let code = "for i in range(10):\n    print(i)";
    let ranked: Vec<(&str, i32)> = LanguageDetector::default()
        .detect_scored(code)
        .into_iter()
        .map(|(l, s)| (l.name(), s))
        .collect();

    assert_eq!(ranked, vec![("Python", 5), ("Lua", 0)]);
    assert_eq!(name_of(code), Some("Python"));
    assert!(validate_language(code, "Python").is_valid());
}

#[test]
fn test_javascript_rejected_as_python() {
    let (ok, message) = validate_language(JS_FUNCTION, "Python").into_parts();
    assert!(!ok);
    assert_eq!(message, "Code appears to be JavaScript but Python was selected");
}

#[test]
fn test_java_main_outscores_other_candidates() {
    let detector = LanguageDetector::default();
    let ranked = detector.detect_scored(JAVA_MAIN);
    assert!(ranked.len() > 1, "expected an ambiguous match set");
    assert_eq!(ranked[0].0.name(), "Java");
    assert!(ranked[0].1 > ranked[1].1);
}

#[test]
fn test_julia_struct_block() {
    let matches = LanguageDetector::default().matching_languages(JULIA_STRUCT);
    assert!(!matches.keys().any(|l| l.name() == "SQL"));
    assert_eq!(name_of(JULIA_STRUCT), Some("Julia"));
}

#[test]
fn test_validate_accepts_aliases_case_insensitively() {
    assert!(validate_language(JS_FUNCTION, "javascript").is_valid());
    assert!(validate_language(JS_FUNCTION, "js").is_valid());
    assert!(validate_language(JAVA_MAIN, "JAVA").is_valid());
}

#[test]
fn test_validate_is_permissive_for_unknown_inputs() {
    assert!(validate_language("", "Python").is_valid());
    assert!(validate_language(JS_FUNCTION, "").is_valid());
    assert!(validate_language(JS_FUNCTION, "Brainfuck").is_valid());
}

#[test]
fn test_registry_lists_all_languages() {
    let registry = LanguageRegistry::builtin();
    let names: Vec<&str> = registry.languages().map(|l| l.name()).collect();
    assert_eq!(names.len(), 17);
    for expected in ["Python", "JavaScript", "Java", "C++", "Julia", "Go", "TypeScript", "SQL"] {
        assert!(names.contains(&expected), "{expected} missing");
    }
}

// ============================================================================
// Properties
// ============================================================================

const FRAGMENTS: &[&str] = &[
    "def foo(x):",
    "    return x + 1",
    "function add(a, b) { return a + b; }",
    "const total = items.length;",
    "public static void main(String[] args) {",
    "System.out.println(total);",
    "#include <iostream>",
    "std::cout << x << std::endl;",
    "fn main() {",
    "let mut v = Vec::new();",
    "package main",
    "fmt.Println(\"hi\")",
    "puts 'hello'",
    "end",
    "SELECT id FROM users WHERE id = 1;",
    "local t = {}",
    "<?php echo $name; ?>",
    "data class User(val name: String)",
    "x <- c(1, 2, 3)",
    "my $count = 0;",
    "println(x)",
    "}",
    "",
];

fn snippet() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(FRAGMENTS), 0..8).prop_map(|v| v.join("\n")),
        "[ -~\n]{0,120}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_detected_language_always_matches_its_predicate(code in snippet()) {
        let detector = LanguageDetector::default();
        if let Some(language) = detector.detect(&code) {
            prop_assert!(detector.matching_languages(&code).contains_key(&language));
        }
    }

    #[test]
    fn prop_detection_is_deterministic(code in snippet()) {
        let detector = LanguageDetector::default();
        prop_assert_eq!(detector.detect_scored(&code), detector.detect_scored(&code));
    }

    #[test]
    fn prop_ranking_is_score_desc_then_name(code in snippet()) {
        let ranked = LanguageDetector::default().detect_scored(&code);
        for pair in ranked.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.1 > b.1 || (a.1 == b.1 && a.0.name() < b.0.name()));
        }
    }

    #[test]
    fn prop_single_candidate_is_returned(code in snippet()) {
        let detector = LanguageDetector::default();
        let matches = detector.matching_languages(&code);
        if matches.len() == 1 {
            let only = *matches.keys().next().unwrap();
            prop_assert_eq!(detector.detect(&code), Some(only));
        }
    }

    #[test]
    fn prop_validate_passes_for_every_matching_language(code in snippet()) {
        let detector = LanguageDetector::default();
        for language in detector.matching_languages(&code).keys() {
            prop_assert!(detector.validate(&code, language.name()).is_valid());
        }
    }

    #[test]
    fn prop_mismatch_explanation_names_expected(code in snippet()) {
        let detector = LanguageDetector::default();
        if let Validation::Mismatch { expected, .. } = detector.validate(&code, "Go") {
            prop_assert_eq!(expected.name(), "Go");
            let explanation = detector.validate(&code, "Go").explanation();
            prop_assert!(explanation.ends_with("but Go was selected"));
        }
    }
}

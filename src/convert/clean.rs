//! Post-processing of model responses

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown fences and a leading "Here is the converted ..." line
static RESPONSE_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(```\w*\n?)|(^Here is the converted( is the converted)?.*?\n)")
        .expect("Invalid response cleanup regex")
});

/// Leading keywords of lines that never get wrapped in `print(...)`
const STATEMENT_KEYWORDS: &[&str] = &[
    "def", "async", "class", "if", "elif", "else", "for", "while", "with", "try", "except",
    "finally", "return", "raise", "pass", "break", "continue", "assert", "global", "nonlocal",
    "del", "yield", "import", "from", "print",
];

fn is_statement(stripped: &str) -> bool {
    if stripped.starts_with('@') || stripped.starts_with('#') {
        return true;
    }
    let head = stripped
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();
    STATEMENT_KEYWORDS.contains(&head)
}

/// Strip fences and preamble, then trim
#[must_use]
pub fn clean_response(response: &str) -> String {
    RESPONSE_NOISE.replace_all(response, "").trim().to_string()
}

/// Make converted Python show its results when run
///
/// Bare top-level expressions become `print(expr)`. Indented lines (bodies of
/// functions, classes and control flow), blank lines, statements and
/// assignments are kept as they are. Output always ends with one newline.
#[must_use]
pub fn prepare_python_code(code: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in code.trim().lines() {
        let stripped = line.trim();
        let indented = line.starts_with(char::is_whitespace);

        let keep = stripped.is_empty()
            || indented
            || is_statement(stripped)
            || stripped.contains('=');

        if keep {
            out.push(line.to_string());
        } else {
            out.push(format!("print({stripped})"));
        }
    }

    let mut prepared = out.join("\n");
    prepared.push('\n');
    prepared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_fences() {
        let response = "```python\nprint('hi')\n```";
        assert_eq!(clean_response(response), "print('hi')");
    }

    #[test]
    fn test_clean_strips_preamble_line() {
        let response = "Here is the converted code in Go:\n```go\npackage main\n```\n";
        assert_eq!(clean_response(response), "package main");
    }

    #[test]
    fn test_clean_leaves_plain_code() {
        assert_eq!(clean_response("  x = 1\n"), "x = 1");
    }

    #[test]
    fn test_prepare_wraps_bare_calls_only() {
        let code = "import math\n\ndef area(r):\n    return math.pi * r * r\n\nr = 2\narea(r)\nprint(r)\n";
        let expected = "import math\n\ndef area(r):\n    return math.pi * r * r\n\nr = 2\nprint(area(r))\nprint(r)\n";
        assert_eq!(prepare_python_code(code), expected);
    }

    #[test]
    fn test_prepare_keeps_control_flow_bodies() {
        let code = "for i in range(3):\n    i * 2\nelse:\n    done()";
        assert_eq!(prepare_python_code(code), format!("{code}\n"));
    }

    #[test]
    fn test_prepare_comparison_counts_as_assignment() {
        assert_eq!(prepare_python_code("a == b"), "a == b\n");
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert_eq!(prepare_python_code("return_value()"), "print(return_value())\n");
        assert_eq!(prepare_python_code("printer.run()"), "print(printer.run())\n");
        assert_eq!(prepare_python_code("@cache"), "@cache\n");
    }
}

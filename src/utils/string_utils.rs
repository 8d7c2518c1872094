//! UTF-8-safe string truncation
//!
//! Used when logging or surfacing provider error bodies and code previews,
//! which may contain arbitrary multi-byte characters.

/// Safely truncate a string to a maximum number of CHARACTERS (not bytes).
///
/// Never panics on multi-byte characters; returns the whole string when it is
/// already short enough.
///
/// # Examples
/// ```
/// # use kodegen_tools_codexchange::utils::string_utils::safe_truncate_chars;
/// assert_eq!(safe_truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(safe_truncate_chars("🎉🎊🎈", 2), "🎉🎊");
/// assert_eq!(safe_truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn safe_truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Truncate to `max_chars` and mark the cut with an ellipsis
pub fn preview(s: &str, max_chars: usize) -> String {
    let truncated = safe_truncate_chars(s, max_chars);
    if truncated.len() < s.len() {
        format!("{truncated}…")
    } else {
        truncated.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_marks_truncation() {
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("abc", 3), "abc");
        assert_eq!(preview("ünïcödé", 2), "ün…");
    }
}

//! Conversion prompt rendering

/// Render the conversion instruction for one request
///
/// The model is asked for bare code so the response needs as little cleanup
/// as possible; [`super::clean::clean_response`] handles the rest.
#[must_use]
pub fn render_prompt(source: &str, target: &str, code: &str) -> String {
    format!(
        "Convert the following {source} code to {target}.\n\
         Preserve the behaviour and the printed output exactly.\n\
         Use idiomatic {target} and only its standard library.\n\
         Respond with the {target} code only, without explanations or markdown fences.\n\
         \n\
         {source} code:\n\
         {code}\n"
    )
}

//! Endpoint URL construction.

/// Strip trailing slashes so endpoint paths can be appended safely.
///
/// ```
/// use vibe_architect::utils::url::normalize_base_url;
///
/// assert_eq!(
///     normalize_base_url("https://generativelanguage.googleapis.com/v1beta//"),
///     "https://generativelanguage.googleapis.com/v1beta"
/// );
/// ```
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim().trim_end_matches('/')
}

/// URL of the `generateContent` method for `model`.
///
/// A `models/` prefix on the model name is tolerated, since the API lists
/// models that way.
///
/// ```
/// use vibe_architect::utils::url::generate_content_url;
///
/// assert_eq!(
///     generate_content_url("https://example.test/v1beta/", "models/gemini-pro"),
///     "https://example.test/v1beta/models/gemini-pro:generateContent"
/// );
/// ```
pub fn generate_content_url(base_url: &str, model: &str) -> String {
    let model = model.trim().trim_start_matches('/');
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!(
        "{}/models/{}:generateContent",
        normalize_base_url(base_url),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_model_name() {
        assert_eq!(
            generate_content_url("https://example.test/v1beta", "gemini-3-pro-preview"),
            "https://example.test/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }

    #[test]
    fn trailing_slashes_and_whitespace() {
        assert_eq!(normalize_base_url(" https://example.test/ "), "https://example.test");
        assert_eq!(normalize_base_url("https://example.test"), "https://example.test");
    }
}

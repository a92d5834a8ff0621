//! Response helpers shared by the provider clients.

use crate::error::ProviderError;

/// Longest error body kept in [`ProviderError::Api`].
const MAX_ERROR_BODY: usize = 2_000;

/// Ensure the response has a success status code. Returns the response
/// unchanged on success, or a [`ProviderError::Api`] containing the status
/// and (truncated) body text on failure.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let mut body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(ProviderError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidResponse(e.to_string()))
}

/// Join a base URL and a path without doubling the slash.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Treat empty configuration strings as missing.
pub(crate) fn configured(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join("https://api.test/v1/", "/chat/completions"), "https://api.test/v1/chat/completions");
        assert_eq!(join("https://api.test", "v1/image"), "https://api.test/v1/image");
    }

    #[test]
    fn blank_values_are_unconfigured() {
        assert_eq!(configured(&Some("  ".into())), None);
        assert_eq!(configured(&None), None);
        assert_eq!(configured(&Some("key".into())), Some("key"));
    }
}

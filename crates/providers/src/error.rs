/// Errors from the outbound provider layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Credentials or base URL are missing from configuration.
    #[error("Provider not configured: {0}")]
    NotConfigured(&'static str),

    /// A 2xx reply whose body does not have the expected shape.
    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),
}

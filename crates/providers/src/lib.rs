//! Outbound HTTP clients for the hosted AI and rendering services.
//!
//! Each service sits behind an `async_trait` trait so handlers and the
//! carousel pipeline can be exercised with in-memory fakes. Every call is a
//! single attempt bounded by the client's request timeout.

pub mod chat;
pub mod error;
pub mod image;
pub mod render;

mod http;

pub use chat::{ChatCompletion, ChatModel, ChatRequest, OpenAiChat, OpenAiChatConfig, TokenUsage};
pub use error::ProviderError;
pub use image::{ImageGenerator, OpenAiImages, OpenAiImagesConfig};
pub use render::{HtmlCssToImage, HtmlCssToImageConfig, HtmlRenderer, RenderRequest};

/// Build the shared [`reqwest::Client`] used by every provider.
pub fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

//! Image-generation client for OpenAI-compatible `images/generations`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::http::{configured, join, parse_response};

/// A hosted text-to-image model.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate one image and return a URL for it. Providers that only
    /// return inline data yield a `data:` URL.
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiImagesConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

pub struct OpenAiImages {
    client: reqwest::Client,
    config: OpenAiImagesConfig,
}

#[derive(Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    n: u8,
}

#[derive(Deserialize)]
struct GenerationReply {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    b64_json: Option<String>,
}

impl OpenAiImages {
    pub fn new(client: reqwest::Client, config: OpenAiImagesConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImages {
    async fn generate(&self, prompt: &str, size: &str) -> Result<String, ProviderError> {
        let api_key = configured(&self.config.api_key)
            .ok_or(ProviderError::NotConfigured("IMAGE_API_KEY is not set"))?;

        let body = GenerationBody {
            model: &self.config.model,
            prompt,
            size,
            n: 1,
        };

        let response = self
            .client
            .post(join(&self.config.base_url, "images/generations"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let reply: GenerationReply = parse_response(response).await?;
        first_image_url(reply)
    }
}

fn first_image_url(reply: GenerationReply) -> Result<String, ProviderError> {
    let image = reply
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("no image in reply".into()))?;

    match (image.url, image.b64_json) {
        (Some(url), _) if !url.is_empty() => Ok(url),
        (_, Some(b64)) if !b64.is_empty() => Ok(format!("data:image/png;base64,{b64}")),
        _ => Err(ProviderError::InvalidResponse("image has neither url nor b64_json".into())),
    }
}

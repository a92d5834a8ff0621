//! HTML/CSS-to-image rasterisation client.
//!
//! Speaks the hcti.io-style API: `POST {base}/v1/image` with HTTP basic
//! auth (user id, API key) and a JSON body; the reply carries the hosted
//! image `url`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::http::{configured, join, parse_response};

/// One document to rasterise.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

/// A service turning an HTML document into a hosted image.
#[async_trait]
pub trait HtmlRenderer: Send + Sync {
    async fn render(&self, request: &RenderRequest) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct HtmlCssToImageConfig {
    pub base_url: String,
    pub user_id: Option<String>,
    pub api_key: Option<String>,
}

pub struct HtmlCssToImage {
    client: reqwest::Client,
    config: HtmlCssToImageConfig,
}

#[derive(Deserialize)]
struct RenderReply {
    url: Option<String>,
}

impl HtmlCssToImage {
    pub fn new(client: reqwest::Client, config: HtmlCssToImageConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl HtmlRenderer for HtmlCssToImage {
    async fn render(&self, request: &RenderRequest) -> Result<String, ProviderError> {
        let (Some(user_id), Some(api_key)) = (
            configured(&self.config.user_id),
            configured(&self.config.api_key),
        ) else {
            return Err(ProviderError::NotConfigured(
                "RENDER_USER_ID and RENDER_API_KEY must be set",
            ));
        };

        let response = self
            .client
            .post(join(&self.config.base_url, "v1/image"))
            .basic_auth(user_id, Some(api_key))
            .json(request)
            .send()
            .await?;

        let reply: RenderReply = parse_response(response).await?;
        reply
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ProviderError::InvalidResponse("render reply has no url".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_missing_css() {
        let req = RenderRequest {
            html: "<p>hi</p>".into(),
            css: None,
            viewport_width: 1080,
            viewport_height: 1080,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["viewport_width"], 1080);
        assert!(value.get("css").is_none());
    }

    #[tokio::test]
    async fn missing_credentials_are_not_configured() {
        let renderer = HtmlCssToImage::new(
            reqwest::Client::new(),
            HtmlCssToImageConfig {
                base_url: "http://127.0.0.1:9".into(),
                user_id: Some("user".into()),
                api_key: None,
            },
        );
        let req = RenderRequest {
            html: String::new(),
            css: None,
            viewport_width: 1,
            viewport_height: 1,
        };
        let err = renderer.render(&req).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}

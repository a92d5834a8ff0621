//! Chat-completion client for OpenAI-compatible APIs.

use agencia_core::assistants::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::http::{configured, join, parse_response};

/// One chat-completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    /// Overrides the client's default completion budget.
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

/// The assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    pub content: String,
    /// Model name as reported by the provider.
    pub model: String,
    pub usage: TokenUsage,
}

/// A hosted chat model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct OpenAiChatConfig {
    /// Base URL up to and including the version segment, e.g.
    /// `https://api.openai.com/v1`.
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

/// HTTP client for `POST {base}/chat/completions`.
pub struct OpenAiChat {
    client: reqwest::Client,
    config: OpenAiChatConfig,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionReply {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiChat {
    pub fn new(client: reqwest::Client, config: OpenAiChatConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        let api_key = configured(&self.config.api_key)
            .ok_or(ProviderError::NotConfigured("LLM_API_KEY is not set"))?;

        let body = CompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(join(&self.config.base_url, "chat/completions"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let reply: CompletionReply = parse_response(response).await?;
        into_completion(reply, &self.config.model)
    }
}

fn into_completion(
    reply: CompletionReply,
    fallback_model: &str,
) -> Result<ChatCompletion, ProviderError> {
    let content = reply
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ProviderError::InvalidResponse("completion has no message content".into()))?;

    Ok(ChatCompletion {
        content,
        model: reply.model.unwrap_or_else(|| fallback_model.to_string()),
        usage: reply.usage.unwrap_or_default(),
    })
}

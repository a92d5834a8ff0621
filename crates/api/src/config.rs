use std::time::Duration;

use agencia_providers::{HtmlCssToImageConfig, OpenAiChatConfig, OpenAiImagesConfig};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). AI endpoints chain
    /// several upstream calls, so this is higher than a plain CRUD API needs.
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Mark the session cookie `Secure` (default: `false`).
    pub cookie_secure: bool,
    /// Outbound AI and rendering services.
    pub ai: AiConfig,
}

/// Settings for the hosted chat, image and rendering services.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub chat: OpenAiChatConfig,
    pub images: OpenAiImagesConfig,
    pub render: HtmlCssToImageConfig,
    /// Language every assistant and generated slide replies in.
    pub language: String,
    /// Per-request timeout for outbound provider calls.
    pub provider_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `HOST`                  | `0.0.0.0`                    |
    /// | `PORT`                  | `3000`                       |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`                         |
    /// | `COOKIE_SECURE`         | `false`                      |
    /// | `LLM_API_URL`           | `https://api.openai.com/v1`  |
    /// | `LLM_API_KEY`           | unset                        |
    /// | `LLM_MODEL`             | `gpt-4o-mini`                |
    /// | `LLM_MAX_TOKENS`        | `1500`                       |
    /// | `AI_RESPONSE_LANGUAGE`  | `pt-BR`                      |
    /// | `IMAGE_API_URL`         | `https://api.openai.com/v1`  |
    /// | `IMAGE_API_KEY`         | falls back to `LLM_API_KEY`  |
    /// | `IMAGE_MODEL`           | `dall-e-3`                   |
    /// | `RENDER_API_URL`        | `https://hcti.io`            |
    /// | `RENDER_USER_ID`        | unset                        |
    /// | `RENDER_API_KEY`        | unset                        |
    /// | `PROVIDER_TIMEOUT_SECS` | `45`                         |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "60")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cookie_secure: bool = env_or("COOKIE_SECURE", "false")
            .parse()
            .expect("COOKIE_SECURE must be true or false");

        let jwt = JwtConfig::from_env();
        let ai = AiConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            cookie_secure,
            ai,
        }
    }
}

impl AiConfig {
    pub fn from_env() -> Self {
        let llm_key = env_opt("LLM_API_KEY");

        let max_tokens: u32 = env_or("LLM_MAX_TOKENS", "1500")
            .parse()
            .expect("LLM_MAX_TOKENS must be a valid u32");

        let provider_timeout_secs: u64 = env_or("PROVIDER_TIMEOUT_SECS", "45")
            .parse()
            .expect("PROVIDER_TIMEOUT_SECS must be a valid u64");

        Self {
            chat: OpenAiChatConfig {
                base_url: env_or("LLM_API_URL", "https://api.openai.com/v1"),
                api_key: llm_key.clone(),
                model: env_or("LLM_MODEL", "gpt-4o-mini"),
                max_tokens,
            },
            images: OpenAiImagesConfig {
                base_url: env_or("IMAGE_API_URL", "https://api.openai.com/v1"),
                api_key: env_opt("IMAGE_API_KEY").or(llm_key),
                model: env_or("IMAGE_MODEL", "dall-e-3"),
            },
            render: HtmlCssToImageConfig {
                base_url: env_or("RENDER_API_URL", "https://hcti.io"),
                user_id: env_opt("RENDER_USER_ID"),
                api_key: env_opt("RENDER_API_KEY"),
            },
            language: env_or("AI_RESPONSE_LANGUAGE", "pt-BR"),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

//! Shared helpers for HTTP-level integration tests.
//!
//! Requests go straight into the router through `tower::ServiceExt::oneshot`;
//! no listener is bound. Outbound AI services are replaced by in-memory
//! fakes so degradation paths can be driven deterministically.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agencia_api::auth::jwt::JwtConfig;
use agencia_api::config::{AiConfig, ServerConfig};
use agencia_api::router::build_app_router;
use agencia_api::state::AppState;
use agencia_providers::{
    ChatCompletion, ChatModel, ChatRequest, HtmlCssToImageConfig, HtmlRenderer, ImageGenerator,
    OpenAiChatConfig, OpenAiImagesConfig, ProviderError, RenderRequest, TokenUsage,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fake providers
// ---------------------------------------------------------------------------

/// Chat model that answers with a fixed reply, or fails when `reply` is `None`.
pub struct FakeChat {
    pub reply: Option<String>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All message contents of the most recent request, joined.
    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| {
                r.messages
                    .iter()
                    .map(|m| m.content.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for FakeChat {
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion, ProviderError> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Some(content) => Ok(ChatCompletion {
                content: content.clone(),
                model: "fake-model".to_string(),
                usage: TokenUsage {
                    prompt_tokens: 120,
                    completion_tokens: 30,
                },
            }),
            None => Err(ProviderError::Api {
                status: 500,
                body: "model overloaded".to_string(),
            }),
        }
    }
}

pub struct FakeImages {
    pub fail: bool,
}

#[async_trait]
impl ImageGenerator for FakeImages {
    async fn generate(&self, _prompt: &str, _size: &str) -> Result<String, ProviderError> {
        if self.fail {
            Err(ProviderError::NotConfigured("image generation"))
        } else {
            Ok("https://images.test/background.png".to_string())
        }
    }
}

/// Renderer that succeeds except for the 0-based calls in `fail_calls`.
pub struct FakeRenderer {
    pub fail_all: bool,
    pub fail_calls: Vec<usize>,
    pub calls: AtomicUsize,
    pub documents: Mutex<Vec<String>>,
}

impl FakeRenderer {
    pub fn working() -> Self {
        Self {
            fail_all: false,
            fail_calls: Vec::new(),
            calls: AtomicUsize::new(0),
            documents: Mutex::new(Vec::new()),
        }
    }

    pub fn broken() -> Self {
        Self {
            fail_all: true,
            ..Self::working()
        }
    }
}

#[async_trait]
impl HtmlRenderer for FakeRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().push(request.html.clone());
        if self.fail_all || self.fail_calls.contains(&call) {
            return Err(ProviderError::Api {
                status: 502,
                body: "render farm down".to_string(),
            });
        }
        Ok(format!("https://render.test/{call}.png"))
    }
}

/// The provider set injected into [`AppState`].
#[derive(Clone)]
pub struct Providers {
    pub chat: Arc<FakeChat>,
    pub images: Arc<FakeImages>,
    pub renderer: Arc<FakeRenderer>,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            chat: Arc::new(FakeChat::replying("Tudo certo por aqui.")),
            images: Arc::new(FakeImages { fail: false }),
            renderer: Arc::new(FakeRenderer::working()),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults. Provider URLs point at a
/// closed port; the fakes above are used instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            expiry_hours: 1,
        },
        cookie_secure: false,
        ai: AiConfig {
            chat: OpenAiChatConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: None,
                model: "fake-model".to_string(),
                max_tokens: 256,
            },
            images: OpenAiImagesConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                api_key: None,
                model: "fake-images".to_string(),
            },
            render: HtmlCssToImageConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                user_id: None,
                api_key: None,
            },
            language: "pt-BR".to_string(),
            provider_timeout: Duration::from_secs(1),
        },
    }
}

/// Full application router with working fake providers.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Providers::default())
}

/// Full application router with the given providers, through the same
/// [`build_app_router`] the binary uses.
pub fn build_test_app_with(pool: PgPool, providers: Providers) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        chat: providers.chat,
        images: providers.images,
        renderer: providers.renderer,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect and parse a JSON response body.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a new agency with its owner and return the owner's token.
pub async fn register(app: &Router, agency_name: &str, email: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "agency_name": agency_name,
            "name": "Owner",
            "email": email,
            "password": "senha-segura-123",
        })),
    )
    .await;
    assert_eq!(response.status(), 201, "registration should succeed");
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a client through the API and return its id.
pub async fn create_client(app: &Router, token: &str, name: &str) -> i64 {
    let response = post_json(app, "/api/clients", token, serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), 201);
    body_json(response).await["id"].as_i64().unwrap()
}

//! Handlers for Instagram carousel generation under `/instagram`.
//!
//! Nothing here is persisted. Slide texts degrade to a static deck when the
//! model fails; backgrounds and rasterisation degrade per slide inside the
//! pipeline.

use agencia_core::carousel::{CarouselTemplate, Slide, DEFAULT_SLIDES};
use agencia_pipeline::carousel::BACKGROUND_SIZE;
use agencia_pipeline::template::{Theme, DEFAULT_BRAND_COLOR};
use agencia_pipeline::{generate_slides, CarouselOutcome, CarouselRequest};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ia::record_usage;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContentRequest {
    #[validate(length(min = 1, max = 200, message = "topic must be 1-200 characters"))]
    pub topic: String,
    #[validate(range(min = 1, max = 10, message = "slide_count must be between 1 and 10"))]
    pub slide_count: Option<usize>,
    #[validate(length(max = 200, message = "tone must be at most 200 characters"))]
    pub tone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub slides: Vec<Slide>,
    /// `true` when the model failed and the static deck was returned.
    pub fallback: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BackgroundRequest {
    #[validate(length(min = 1, max = 1000, message = "prompt must be 1-1000 characters"))]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct BackgroundResponse {
    pub url: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CarouselBody {
    #[validate(length(min = 1, max = 200, message = "topic must be 1-200 characters"))]
    pub topic: String,
    #[validate(range(min = 1, max = 10, message = "slide_count must be between 1 and 10"))]
    pub slide_count: Option<usize>,
    #[validate(length(max = 200, message = "tone must be at most 200 characters"))]
    pub tone: Option<String>,
    #[serde(default)]
    pub template: CarouselTemplate,
    #[validate(custom(function = "agencia_core::validation::hex_color"))]
    pub brand_color: Option<String>,
    #[serde(default)]
    pub with_backgrounds: bool,
    /// Pre-written slides. When present, no text is generated.
    #[validate(length(min = 1, max = 10, message = "slides must hold 1-10 items"), nested)]
    pub slides: Option<Vec<Slide>>,
}

/// POST /api/instagram/content
pub async fn content(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ContentRequest>,
) -> AppResult<Json<ContentResponse>> {
    let generated = generate_slides(
        state.chat.as_ref(),
        input.topic.trim(),
        input.slide_count.unwrap_or(DEFAULT_SLIDES),
        input.tone.as_deref(),
        &state.config.ai.language,
    )
    .await;

    if let Some(completion) = &generated.completion {
        record_usage(&state, &auth, "instagram.content".into(), completion).await;
    }

    Ok(Json(ContentResponse {
        slides: generated.slides,
        fallback: generated.fallback,
    }))
}

/// POST /api/instagram/background
pub async fn background(
    _auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BackgroundRequest>,
) -> AppResult<Json<BackgroundResponse>> {
    let url = state
        .images
        .generate(input.prompt.trim(), BACKGROUND_SIZE)
        .await
        .map_err(|e| {
            tracing::warn!(provider = "images", error = %e, "Background generation failed");
            AppError::from(e)
        })?;
    Ok(Json(BackgroundResponse { url }))
}

/// POST /api/instagram/carousel
pub async fn carousel(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CarouselBody>,
) -> AppResult<Json<CarouselOutcome>> {
    let request = CarouselRequest {
        topic: input.topic.trim().to_string(),
        slide_count: input.slide_count.unwrap_or(DEFAULT_SLIDES),
        tone: input.tone,
        theme: Theme {
            template: input.template,
            brand_color: input
                .brand_color
                .unwrap_or_else(|| DEFAULT_BRAND_COLOR.to_string()),
        },
        with_backgrounds: input.with_backgrounds,
        slides: input.slides,
        language: state.config.ai.language.clone(),
    };

    let outcome = state.carousel_pipeline().run(request).await?;

    if let Some(completion) = &outcome.completion {
        record_usage(&state, &auth, "instagram.carousel".into(), completion).await;
    }

    Ok(Json(outcome))
}

//! Handlers for the AI assistants under `/ia`.
//!
//! Every assistant runs the same flow: load the context sections it
//! declares, render them to text, make one chat-completion call, and record
//! the usage. A failed completion is a 503; there is no canned reply.

use std::future::Future;

use agencia_core::assistants::{
    compose_messages, AssistantInfo, AssistantKind, ChatMessage, ContextSection,
};
use agencia_core::context::AgencyContext;
use agencia_core::finance::MonthWindow;
use agencia_core::types::{Date, DbId};
use agencia_db::models::ai_usage::{CreateAiUsage, FeatureUsage};
use agencia_db::repositories::{AiUsageRepo, ContextRepo};
use agencia_providers::{ChatCompletion, ChatRequest, TokenUsage};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::dashboard::month_start;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 4000, message = "message must be 1-4000 characters"))]
    pub message: String,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    /// Earlier turns of the conversation, oldest first.
    #[serde(default)]
    #[validate(length(max = 20, message = "history may hold at most 20 turns"), nested)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: String,
    pub assistant: &'static str,
    pub model: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Serialize)]
pub struct UsageResponse {
    /// First day of the current month.
    pub since: Date,
    pub total_requests: i64,
    pub features: Vec<FeatureUsage>,
}

/// GET /api/ia/assistants
pub async fn catalogue(_auth: AuthUser) -> Json<DataResponse<Vec<AssistantInfo>>> {
    let data = AssistantKind::ALL.iter().map(|k| k.info()).collect();
    Json(DataResponse { data })
}

/// GET /api/ia/usage
pub async fn usage(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UsageResponse>> {
    let month = MonthWindow::containing(chrono::Utc::now().date_naive());
    let features =
        AiUsageRepo::summary_since(&state.pool, auth.agency_id, month_start(month.start)).await?;
    let total_requests = features.iter().map(|f| f.requests).sum();
    Ok(Json(UsageResponse {
        since: month.start,
        total_requests,
        features,
    }))
}

/// POST /api/ia/{assistant}
pub async fn ask(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ValidatedJson(input): ValidatedJson<AskRequest>,
) -> AppResult<Json<AskResponse>> {
    let kind = AssistantKind::from_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Unknown assistant '{slug}'")))?;

    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("message must not be blank".into()));
    }
    if kind.requires_client() && input.client_id.is_none() {
        return Err(AppError::BadRequest(format!(
            "client_id is required for the {} assistant",
            kind.slug()
        )));
    }
    if kind.requires_project() && input.project_id.is_none() {
        return Err(AppError::BadRequest(format!(
            "project_id is required for the {} assistant",
            kind.slug()
        )));
    }

    let context = load_context(&state, auth.agency_id, kind, &input).await?;
    let language = &state.config.ai.language;
    let messages = compose_messages(
        kind,
        language,
        &context.render(),
        &input.history,
        input.message.trim(),
    );

    let completion = state
        .chat
        .complete(ChatRequest::new(messages))
        .await
        .map_err(|e| {
            tracing::warn!(
                provider = "chat",
                assistant = kind.slug(),
                error = %e,
                "Assistant call failed"
            );
            AppError::from(e)
        })?;

    record_usage(&state, &auth, kind.feature(), &completion).await;

    Ok(Json(AskResponse {
        reply: completion.content,
        assistant: kind.slug(),
        model: completion.model,
        usage: completion.usage,
    }))
}

/// Fetch the sections `kind` declares, concurrently. Sections it does not
/// declare are never queried.
async fn load_context(
    state: &AppState,
    agency_id: DbId,
    kind: AssistantKind,
    input: &AskRequest,
) -> AppResult<AgencyContext> {
    let pool = &state.pool;
    let today = chrono::Utc::now().date_naive();
    let wants = |section: ContextSection| kind.sections().contains(&section);

    let client_id = input.client_id.filter(|_| wants(ContextSection::Client));
    let project_id = input.project_id.filter(|_| wants(ContextSection::Project));

    let (agency, clients, projects, finances, tasks, client, project) = tokio::try_join!(
        when(
            wants(ContextSection::Agency),
            ContextRepo::agency(pool, agency_id)
        ),
        when(
            wants(ContextSection::Clients),
            ContextRepo::clients(pool, agency_id)
        ),
        when(
            wants(ContextSection::Projects),
            ContextRepo::projects(pool, agency_id)
        ),
        when(
            wants(ContextSection::Finances),
            ContextRepo::finances(pool, agency_id, today)
        ),
        when(
            wants(ContextSection::Tasks),
            ContextRepo::tasks(pool, agency_id, today)
        ),
        when(
            client_id.is_some(),
            ContextRepo::client_detail(pool, agency_id, client_id.unwrap_or_default())
        ),
        when(
            project_id.is_some(),
            ContextRepo::project_detail(pool, agency_id, project_id.unwrap_or_default())
        ),
    )?;

    let client = match (client_id, client.flatten()) {
        (Some(id), None) => return Err(AppError::not_found("Client", id)),
        (_, detail) => detail,
    };
    let project = match (project_id, project.flatten()) {
        (Some(id), None) => return Err(AppError::not_found("Project", id)),
        (_, detail) => detail,
    };

    Ok(AgencyContext {
        agency: agency.flatten(),
        clients,
        projects,
        finances,
        tasks,
        client,
        project,
    })
}

/// Await `query` only when `enabled`.
async fn when<T, F>(enabled: bool, query: F) -> Result<Option<T>, sqlx::Error>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    if enabled {
        query.await.map(Some)
    } else {
        Ok(None)
    }
}

/// Append an `ai_usage` row. A failed insert is logged, not surfaced: the
/// caller already has a reply worth returning.
pub(crate) async fn record_usage(
    state: &AppState,
    auth: &AuthUser,
    feature: String,
    completion: &ChatCompletion,
) {
    let usage = CreateAiUsage {
        user_id: Some(auth.user_id),
        feature,
        model: completion.model.clone(),
        prompt_tokens: i32::try_from(completion.usage.prompt_tokens).unwrap_or(i32::MAX),
        completion_tokens: i32::try_from(completion.usage.completion_tokens).unwrap_or(i32::MAX),
    };
    if let Err(e) = AiUsageRepo::record(&state.pool, auth.agency_id, &usage).await {
        tracing::error!(error = %e, feature = %usage.feature, "Failed to record AI usage");
    }
}

//! Handlers for registration, login and the current session.

use agencia_core::error::CoreError;
use agencia_core::naming::{slugify, with_suffix};
use agencia_core::roles::ROLE_OWNER;
use agencia_db::models::agency::{Agency, CreateAgency};
use agencia_db::models::user::{CreateUser, User};
use agencia_db::repositories::{AgencyRepo, UserRepo};
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The `Set-Cookie` header carried by session-changing responses.
type SetCookie = [(HeaderName, HeaderValue); 1];

/// Slug candidates tried before giving up with a conflict.
const MAX_SLUG_ATTEMPTS: u32 = 20;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 120, message = "agency_name must be 1-120 characters"))]
    pub agency_name: String,
    #[validate(length(min = 1, max = 120, message = "name must be 1-120 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Body of a successful register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub agency: Agency,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub agency: Agency,
}

/// POST /api/auth/register
///
/// Creates the agency and its owner in one transaction and signs the owner in.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, SetCookie, Json<AuthResponse>)> {
    let slug = free_slug(&state, &input.agency_name).await?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let (agency, user) = AgencyRepo::create_with_owner(
        &state.pool,
        &CreateAgency {
            name: input.agency_name.trim().to_string(),
            slug,
        },
        &CreateUser {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            role: ROLE_OWNER.to_string(),
        },
    )
    .await?;

    tracing::info!(agency_id = agency.id, user_id = user.id, slug = %agency.slug, "Agency registered");

    let (cookie, body) = issue_session(&state, user, agency)?;
    Ok((StatusCode::CREATED, [(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/auth/login
///
/// Unknown e-mail and wrong password produce the same 401 after the same
/// Argon2 work, so neither the body nor the timing reveals which accounts
/// exist.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<(SetCookie, Json<AuthResponse>)> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        verify_against_dummy(&input.password);
        return Err(invalid());
    };

    let matches = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !matches {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    UserRepo::record_login(&state.pool, user.id).await?;

    let agency = AgencyRepo::find_by_id(&state.pool, user.agency_id)
        .await?
        .ok_or(AppError::not_found("Agency", user.agency_id))?;

    tracing::info!(user_id = user.id, agency_id = agency.id, "User logged in");

    let (cookie, body) = issue_session(&state, user, agency)?;
    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logging out only expires the cookie.
pub async fn logout(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, SetCookie)> {
    let cookie = clear_cookie(state.config.cookie_secure)?;
    Ok((StatusCode::NO_CONTENT, [(SET_COOKIE, cookie)]))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.agency_id, auth.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth.user_id))?;
    let agency = AgencyRepo::find_by_id(&state.pool, auth.agency_id)
        .await?
        .ok_or(AppError::not_found("Agency", auth.agency_id))?;
    Ok(Json(MeResponse { user, agency }))
}

fn issue_session(
    state: &AppState,
    user: User,
    agency: Agency,
) -> AppResult<(HeaderValue, AuthResponse)> {
    let jwt = &state.config.jwt;
    let token = generate_token(user.id, agency.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    let cookie = session_cookie(&token, jwt.expiry_secs(), state.config.cookie_secure)?;
    Ok((
        cookie,
        AuthResponse {
            token,
            user,
            agency,
        },
    ))
}

/// First unused slug among `base`, `base-2`, `base-3`, ...
///
/// A concurrent registration can still take the slug between this check and
/// the insert; the unique constraint then answers 409.
async fn free_slug(state: &AppState, agency_name: &str) -> AppResult<String> {
    let base = slugify(agency_name);
    if !AgencyRepo::slug_exists(&state.pool, &base).await? {
        return Ok(base);
    }
    for n in 2..=MAX_SLUG_ATTEMPTS {
        let candidate = with_suffix(&base, n);
        if !AgencyRepo::slug_exists(&state.pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not derive a free slug for agency name '{agency_name}'"
    ))))
}

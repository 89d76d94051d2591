//! Auth handlers — register, login, refresh, logout, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use medipass_core::error::AppError;
use medipass_entity::account::Role;
use medipass_service::auth::service::Registration;

use crate::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::response::{
    AccountResponse, AuthResponse, MessageResponse, ProfileResponse, RefreshTokenResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let roles = req
        .roles
        .iter()
        .map(|r| r.parse::<Role>())
        .collect::<Result<Vec<_>, _>>()?;

    let session = state
        .auth_service
        .register(Registration {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            roles,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: AccountResponse::from(&session.account),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        user: AccountResponse::from(&session.account),
        access_token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, AppError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let access_token = state
        .auth_service
        .refresh_access_token(&req.refresh_token)
        .await?;

    Ok(Json(RefreshTokenResponse { access_token }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.logout(auth.user_id).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let account = state.auth_service.get_profile(auth.user_id).await?;

    Ok(Json(ProfileResponse::from(&account)))
}

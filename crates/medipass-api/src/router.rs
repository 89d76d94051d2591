//! Route definitions for the MediPass HTTP API.
//!
//! Auth routes are mounted under `/api/auth`. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use medipass_core::error::ApiErrorResponse;
use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", auth_routes())
        .route("/health", get(handlers::health::health_check))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: register, login, refresh-token, logout, profile.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh-token", post(handlers::auth::refresh_token))
        .route("/logout", post(handlers::auth::logout))
        .route("/profile", get(handlers::auth::profile))
}

/// Uniform 404 body for unknown routes.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse {
            success: false,
            message: "Resource not found".to_string(),
            stack: None,
        }),
    )
}

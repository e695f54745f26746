//! Login/logout endpoints.
//!
//! A single fixed demo credential gates the instance. This is a
//! convenience lock for a self-hosted deployment, not a security boundary.

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::config;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub email: String,
    pub name: String,
}

/// `POST /api/auth/login` — exchange the demo credentials for a bearer token.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email_ok = request.email.eq_ignore_ascii_case(config::DEMO_EMAIL);
    let password_ok = request.password == config::DEMO_PASSWORD;
    if !email_ok || !password_ok {
        return Err(ApiError::Unauthorized);
    }

    let token = {
        let mut sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.create(config::DEMO_EMAIL, config::DEMO_NAME)
    };

    tracing::info!("login session created");

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            email: config::DEMO_EMAIL.into(),
            name: config::DEMO_NAME.into(),
        },
    }))
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub status: &'static str,
}

/// `POST /api/auth/logout` — invalidate the calling session's token.
pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<LogoutResponse>, ApiError> {
    let mut sessions = ctx
        .sessions
        .lock()
        .map_err(|_| ApiError::Internal("session lock".into()))?;
    sessions.revoke(&user.token);
    Ok(Json(LogoutResponse { status: "ok" }))
}

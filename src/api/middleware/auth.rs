//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, validates it against the
//! in-memory session store, and injects `UserContext` into request
//! extensions for downstream handlers.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};

/// Require a valid bearer token from a logged-in session.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer, which must be outermost).
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let (email, name) = {
        let sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session lock".into()))?;
        sessions.validate(&token).ok_or(ApiError::Unauthorized)?
    };

    req.extensions_mut().insert(UserContext { email, name, token });

    Ok(next.run(req).await)
}

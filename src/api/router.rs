//! API router.
//!
//! Returns a composable `Router` with all endpoints nested under `/api/`.
//! Login and health are open; everything else requires a bearer token.

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost
/// layer); endpoint handlers use `State<ApiContext>` via `with_state`.
pub fn api_router(ctx: ApiContext) -> Router {
    let protected = Router::new()
        .route("/meds", get(endpoints::meds::list).post(endpoints::meds::create))
        .route(
            "/meds/:id",
            put(endpoints::meds::update).delete(endpoints::meds::delete),
        )
        .route(
            "/schedules",
            get(endpoints::schedules::list).post(endpoints::schedules::create),
        )
        .route(
            "/schedules/:id",
            put(endpoints::schedules::update).delete(endpoints::schedules::delete),
        )
        .route(
            "/taken",
            get(endpoints::taken::list).post(endpoints::taken::create),
        )
        .route("/taken/:id", delete(endpoints::taken::delete))
        .route("/doses", get(endpoints::doses::upcoming))
        .route("/auth/logout", post(endpoints::auth::logout))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/login", post(endpoints::auth::login))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .layer(CorsLayer::permissive())
}

use crate::activity;
use crate::api::{handlers, AppState};
use axum::{routing::get, Router};
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main router
pub fn build_router(state: AppState) -> Router {
    let assets_dir = state.config.server.assets_dir.clone();

    let mut router = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        // Activity pages
        .route("/search", get(activity::search))
        .route(
            "/groups/:pubid/search",
            get(activity::group_search).post(activity::group_search_action),
        )
        .route(
            "/users/:username/search",
            get(activity::user_search).post(activity::user_search_action),
        );

    if let Some(dir) = assets_dir {
        tracing::info!(path = %dir.display(), "Serving static assets");
        router = router.nest_service("/assets", ServeDir::new(dir));
    }

    router
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
}

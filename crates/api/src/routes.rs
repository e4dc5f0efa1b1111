use crate::handlers;
use crate::middleware::cors_layer;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Creates all API routes with state
pub fn create_api_routes(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/api/v1/healthz", get(handlers::health_check))
        .route(
            "/api/v1/todo",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/v1/todo/{id}",
            get(handlers::get_task)
                .post(handlers::update_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

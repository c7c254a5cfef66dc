pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::agents::handlers as agents;
use crate::interviews::handlers as interviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interview records
        .route(
            "/api/v1/interviews",
            get(interviews::handle_list_interviews).post(interviews::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/reviews",
            get(interviews::handle_list_reviews).post(interviews::handle_add_review),
        )
        // Run history
        .route("/api/v1/interviews/:id/runs", get(agents::handle_list_runs))
        .route(
            "/api/v1/interviews/:id/runs/:routine/latest",
            get(agents::handle_latest_run),
        )
        // Dispatch
        .route("/api/v1/agents/:routine/:id", post(agents::handle_dispatch))
        .with_state(state)
}

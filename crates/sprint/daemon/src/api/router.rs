//! API router configuration

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        // Accounts
        .route("/accounts", post(handlers::create_account))
        // Projects
        .route("/projects", get(handlers::list_projects))
        .route("/projects", post(handlers::publish_project))
        .route("/projects/:id", get(handlers::get_project))
        .route("/projects/:id/submissions", post(handlers::start_sprint))
        .route("/projects/:id/status", get(handlers::pair_status))
        // Submissions
        .route("/submissions/:id", get(handlers::get_submission))
        .route("/submissions/:id", patch(handlers::update_fields))
        .route(
            "/submissions/:id/deliverables/:deliverable_id",
            post(handlers::toggle_deliverable),
        )
        .route("/submissions/:id/feedback", post(handlers::reveal_feedback))
        .route("/submissions/:id/submit", post(handlers::submit))
        // Verification
        .route(
            "/submissions/:id/verification",
            post(handlers::verify).get(handlers::get_verification),
        )
        // Student views
        .route(
            "/students/:id/submissions",
            get(handlers::list_student_submissions),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ai::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Interview practice
        .route(
            "/api/v1/interviews/generate",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interviews/evaluate",
            post(handlers::handle_evaluate_answer),
        )
        // Resume AI
        .route(
            "/api/v1/resumes/analyze",
            post(handlers::handle_analyze_resume),
        )
        .route("/api/v1/resumes/tailor", post(handlers::handle_tailor_resume))
        .route("/api/v1/resumes/cold-email", post(handlers::handle_cold_email))
        .with_state(state)
}

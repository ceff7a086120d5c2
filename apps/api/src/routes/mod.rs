pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::gap::handlers as gap_handlers;
use crate::skills::handlers as skill_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills
        .route(
            "/api/v1/skills",
            get(skill_handlers::handle_get_skills)
                .put(skill_handlers::handle_replace_skills)
                .post(skill_handlers::handle_add_skill),
        )
        .route(
            "/api/v1/skills/:skill",
            delete(skill_handlers::handle_remove_skill),
        )
        // Résumé extraction
        .route("/api/v1/resume/extract", post(skill_handlers::handle_extract))
        .route(
            "/api/v1/resume/extract/pdf",
            post(skill_handlers::handle_extract_pdf),
        )
        // Recommendations & gap analysis
        .route(
            "/api/v1/jobs/recommendations",
            get(gap_handlers::handle_job_recommendations),
        )
        .route("/api/v1/skill-gap", get(gap_handlers::handle_skill_gap))
        .with_state(state)
}

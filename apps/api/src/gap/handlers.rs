//! Axum route handlers for job recommendations and skill-gap analysis.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::AppError;
use crate::gap::analysis::{list_recommendations, run_gap_analysis, GapAnalysis, JobListing};
use crate::skills::handlers::UserIdQuery;
use crate::state::AppState;

/// GET /api/v1/jobs/recommendations
///
/// Jobs the provider matched to the user's stored skills, in provider order.
pub async fn handle_job_recommendations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobListing>, AppError> {
    let listing = list_recommendations(
        state.skill_store.as_ref(),
        state.recommender.as_ref(),
        params.user_id,
    )
    .await?;
    Ok(Json(listing))
}

/// GET /api/v1/skill-gap
///
/// Matched skills plus the top skills to develop. Returns `status: no_skills`
/// (HTTP 200) when the user has not declared any skills yet.
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<GapAnalysis>, AppError> {
    let analysis = run_gap_analysis(
        state.skill_store.as_ref(),
        state.recommender.as_ref(),
        params.user_id,
    )
    .await?;
    Ok(Json(analysis))
}

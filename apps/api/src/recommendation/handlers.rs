//! Axum route handlers for the Recommendation API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::recommendation::engine::{recommend, Recommendation};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub job_title: String,
    #[serde(default)]
    pub user_skills: Vec<String>,
}

/// POST /api/v1/recommendations
///
/// Returns `recommended`, `no_gap` or `no_recommendations`; an unknown job title is a 404.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Recommendation>, AppError> {
    let job_title = request.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let snapshot = state.catalog.current().await;
    let recommendation = recommend(&snapshot, job_title, request.user_skills.as_slice())?;

    Ok(Json(recommendation))
}

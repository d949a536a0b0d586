pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::recommendation::handlers as recommendation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Recommendation API
        .route(
            "/api/v1/recommendations",
            post(recommendation::handle_recommend),
        )
        // Catalog API
        .route("/api/v1/catalog", get(catalog::handle_catalog_stats))
        .route(
            "/api/v1/catalog/reload",
            post(catalog::handle_catalog_reload),
        )
        .route("/api/v1/catalog/backup", post(catalog::handle_backup_jobs))
        .route("/api/v1/jobs", post(catalog::handle_save_jobs))
        .route("/api/v1/courses", post(catalog::handle_save_courses))
        .with_state(state)
}

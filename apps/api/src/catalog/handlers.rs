//! Axum route handlers for the Catalog API.

use std::path::{Path, PathBuf};

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::csv_io::export_jobs_csv;
use crate::catalog::repository::{save_courses, save_jobs};
use crate::catalog::snapshot::CatalogStats;
use crate::errors::AppError;
use crate::models::catalog::{NewCourse, NewJob};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveJobsRequest {
    pub jobs: Vec<NewJob>,
}

#[derive(Debug, Deserialize)]
pub struct SaveCoursesRequest {
    pub courses: Vec<NewCourse>,
}

#[derive(Debug, Serialize)]
pub struct SavedResponse {
    pub saved: u64,
}

#[derive(Debug, Serialize)]
pub struct BackupResponse {
    pub path: PathBuf,
    pub rows: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
///
/// Stats for the snapshot currently serving recommendations.
pub async fn handle_catalog_stats(State(state): State<AppState>) -> Json<CatalogStats> {
    Json(state.catalog.current().await.stats())
}

/// POST /api/v1/catalog/reload
///
/// Rebuilds the snapshot (course skills + vocabulary) from the catalog source and swaps it in.
pub async fn handle_catalog_reload(
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>, AppError> {
    let snapshot = state.catalog.reload(state.catalog_source.as_ref()).await?;
    Ok(Json(snapshot.stats()))
}

/// POST /api/v1/jobs
///
/// Inserts jobs. The serving snapshot is unchanged until the next reload.
pub async fn handle_save_jobs(
    State(state): State<AppState>,
    Json(request): Json<SaveJobsRequest>,
) -> Result<Json<SavedResponse>, AppError> {
    if request.jobs.iter().any(|j| j.job_title.trim().is_empty()) {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let saved = save_jobs(&state.db, &request.jobs).await?;
    Ok(Json(SavedResponse { saved }))
}

/// POST /api/v1/courses
///
/// Inserts courses. New skills join the vocabulary on the next reload.
pub async fn handle_save_courses(
    State(state): State<AppState>,
    Json(request): Json<SaveCoursesRequest>,
) -> Result<Json<SavedResponse>, AppError> {
    if request.courses.iter().any(|c| c.course_title.trim().is_empty()) {
        return Err(AppError::Validation("course_title cannot be empty".to_string()));
    }

    let saved = save_courses(&state.db, &request.courses).await?;
    Ok(Json(SavedResponse { saved }))
}

/// POST /api/v1/catalog/backup
///
/// Writes the jobs table to a timestamped CSV under `BACKUP_DIR`.
pub async fn handle_backup_jobs(
    State(state): State<AppState>,
) -> Result<Json<BackupResponse>, AppError> {
    let dir = &state.config.backup_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Cannot create {}: {e}", dir.display())))?;

    let path = next_backup_path(dir, Utc::now())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Cannot inspect {}: {e}", dir.display())))?;
    let rows = export_jobs_csv(&state.db, &path).await?;

    Ok(Json(BackupResponse { path, rows }))
}

/// `jobs_backup_<timestamp with microseconds>.csv`, suffixed `_1`, `_2`, ... if that name is taken.
async fn next_backup_path(dir: &Path, now: DateTime<Utc>) -> std::io::Result<PathBuf> {
    let stem = format!("jobs_backup_{}", now.format("%Y%m%d%H%M%S%6f"));
    let mut path = dir.join(format!("{stem}.csv"));
    let mut attempt = 0_u32;
    while tokio::fs::try_exists(&path).await? {
        attempt += 1;
        path = dir.join(format!("{stem}_{attempt}.csv"));
    }
    Ok(path)
}

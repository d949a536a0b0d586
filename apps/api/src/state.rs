use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::snapshot::CatalogHandle;
use crate::catalog::source::CatalogSource;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    /// Current catalog snapshot. Recommendations read it; reloads swap it.
    pub catalog: Arc<CatalogHandle>,
    /// Where reloads fetch jobs and courses from. Default: SQLite via `db`.
    pub catalog_source: Arc<dyn CatalogSource>,
}

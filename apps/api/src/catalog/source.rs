//! Catalog Source — where a snapshot's job and course tables come from.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::catalog::repository;
use crate::models::catalog::{Course, Job};

/// Supplies the job and course tables a `CatalogSnapshot` is built from.
///
/// Carried by the reload path as `&dyn CatalogSource`.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>>;
    async fn fetch_courses(&self) -> Result<Vec<Course>>;
}

/// Reads the catalog from the SQLite `jobs` and `courses` tables.
#[derive(Clone)]
pub struct SqliteCatalogSource {
    pool: SqlitePool,
}

impl SqliteCatalogSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for SqliteCatalogSource {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        repository::fetch_jobs(&self.pool).await
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        repository::fetch_courses(&self.pool).await
    }
}

/// Fixed in-memory tables, for tests.
#[cfg(test)]
pub struct StaticCatalogSource {
    pub jobs: Vec<Job>,
    pub courses: Vec<Course>,
}

#[cfg(test)]
#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.clone())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        Ok(self.courses.clone())
    }
}

/// Serves jobs but fails on courses, as a dropped connection mid-reload would.
#[cfg(test)]
pub struct FailingCatalogSource {
    pub jobs: Vec<Job>,
}

#[cfg(test)]
#[async_trait]
impl CatalogSource for FailingCatalogSource {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        Ok(self.jobs.clone())
    }

    async fn fetch_courses(&self) -> Result<Vec<Course>> {
        Err(anyhow::anyhow!("courses table unavailable"))
    }
}

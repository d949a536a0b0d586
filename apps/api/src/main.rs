mod catalog;
mod config;
mod db;
mod errors;
mod models;
mod recommendation;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::catalog::csv_io::seed_from_dir;
use crate::catalog::snapshot::{CatalogHandle, CatalogSnapshot};
use crate::catalog::source::SqliteCatalogSource;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathfinder API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;

    if let Some(seed_dir) = &config.catalog_seed_dir {
        seed_from_dir(&db, seed_dir).await?;
    }

    // Build the first catalog snapshot (course skills + vocabulary)
    let catalog_source = Arc::new(SqliteCatalogSource::new(db.clone()));
    let catalog = Arc::new(CatalogHandle::new(
        CatalogSnapshot::empty(config.skill_matcher),
        config.skill_matcher,
    ));
    catalog.reload(catalog_source.as_ref()).await?;

    // Build app state
    let state = AppState {
        db,
        config: config.clone(),
        catalog,
        catalog_source,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::recommendation::matcher::MatcherKind;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://pathfinder.sqlite?mode=rwc";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub skill_matcher: MatcherKind,
    /// Directory holding `jobs.csv` / `courses.csv` imported into empty tables at startup.
    pub catalog_seed_dir: Option<PathBuf>,
    pub backup_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_matcher: parse_matcher(std::env::var("SKILL_MATCHER").ok().as_deref())?,
            catalog_seed_dir: std::env::var("CATALOG_SEED_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            backup_dir: std::env::var("BACKUP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./backups")),
        })
    }
}

fn parse_matcher(raw: Option<&str>) -> Result<MatcherKind> {
    match raw {
        None => Ok(MatcherKind::default()),
        Some(v) => v
            .parse::<MatcherKind>()
            .map_err(|e| anyhow!(e))
            .context("SKILL_MATCHER is invalid"),
    }
}

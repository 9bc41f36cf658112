use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::reference::ReferenceTable;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub reference: Arc<ReferenceTable>,
    /// Last-used daily limit; seeds the next edit view, overwritten on every
    /// save. Session-lifetime only, never persisted.
    pub limit_mg: Arc<RwLock<f64>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("connect to database")?;
        let default_limit = config.default_limit_mg;
        Ok(Self::from_parts(
            db,
            config,
            Arc::new(ReferenceTable::builtin()),
            default_limit,
        ))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        reference: Arc<ReferenceTable>,
        limit_mg: f64,
    ) -> Self {
        Self {
            db,
            config,
            reference,
            limit_mg: Arc::new(RwLock::new(limit_mg)),
        }
    }
}

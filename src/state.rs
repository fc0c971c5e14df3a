use anyhow::Context;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::catalog::services::CatalogService;
use crate::catalog::source::FsCatalogSource;
use crate::config::AppConfig;
use crate::kv::KvStore;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await
            .context("open database")?;
        let source = Arc::new(FsCatalogSource::new(config.catalog_dir.clone()));
        let catalog = Arc::new(CatalogService::new(source));
        Ok(Self::from_parts(db, config, catalog))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>, catalog: Arc<CatalogService>) -> Self {
        Self {
            db,
            config,
            catalog,
        }
    }

    /// The namespaced store all persisted state goes through.
    pub fn kv(&self) -> KvStore {
        KvStore::new(self.db.clone(), self.config.key_prefix.clone())
    }
}

#[cfg(test)]
impl AppState {
    pub(crate) async fn in_memory() -> Self {
        let db = crate::kv::test_pool().await;
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            catalog_dir: "data".into(),
            key_prefix: "yaseer_".into(),
            trial_days: 30,
        });
        let source = Arc::new(FsCatalogSource::new(config.catalog_dir.clone()));
        Self::from_parts(db, config, Arc::new(CatalogService::new(source)))
    }
}

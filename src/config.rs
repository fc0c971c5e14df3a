use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub catalog_dir: PathBuf,
    pub key_prefix: String,
    pub trial_days: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://yaseer.db?mode=rwc".into()),
            catalog_dir: std::env::var("CATALOG_DIR")
                .unwrap_or_else(|_| "data".into())
                .into(),
            key_prefix: std::env::var("KEY_PREFIX").unwrap_or_else(|_| "yaseer_".into()),
            trial_days: std::env::var("TRIAL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        })
    }
}

use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where catalog documents come from. Production reads them from disk; tests
/// inject counting or failing sources.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, name: &str) -> anyhow::Result<Vec<u8>>;
}

pub struct FsCatalogSource {
    dir: PathBuf,
}

impl FsCatalogSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl CatalogSource for FsCatalogSource {
    async fn fetch(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.dir.join(name);
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("read catalog document {}", path.display()))?;
        Ok(bytes)
    }
}

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqlitePool;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Namespaced JSON key-value store over the device-local `kv` table.
///
/// Every key is stored with the configured prefix so unrelated data in the
/// same database cannot collide with ours.
#[derive(Clone)]
pub struct KvStore {
    db: SqlitePool,
    prefix: String,
}

impl KvStore {
    pub fn new(db: SqlitePool, prefix: impl Into<String>) -> Self {
        Self {
            db,
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    pub async fn get_raw(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?")
            .bind(self.full_key(key))
            .fetch_optional(&self.db)
            .await
            .context("kv read")?;
        Ok(value)
    }

    pub async fn put_raw(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let updated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .context("format updated_at")?;
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (key) DO UPDATE
            SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(self.full_key(key))
        .bind(value)
        .bind(updated_at)
        .execute(&self.db)
        .await
        .context("kv write")?;
        Ok(())
    }

    /// Removes the entry if present; removing a missing key is a no-op.
    pub async fn delete(&self, key: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(self.full_key(key))
            .execute(&self.db)
            .await
            .context("kv delete")?;
        Ok(())
    }

    /// Reads and deserializes a JSON value. A malformed stored value is an
    /// error here; the policy for it (clear, fall back, ...) belongs to the
    /// caller.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.get_raw(key).await? {
            Some(raw) => {
                let value = serde_json::from_str(&raw)
                    .with_context(|| format!("malformed value for key {}", key))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let raw = serde_json::to_string(value).context("serialize value")?;
        self.put_raw(key, &raw).await
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

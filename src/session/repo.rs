use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;

use crate::kv::KvStore;

/// Storage key for the session record (prefixed by the store).
pub const SESSION_KEY: &str = "user";

/// The single per-device identity. Presence of a record means "logged in";
/// `created_at` anchors the trial window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Reads the persisted record. Any persistence or deserialization failure is
/// absorbed as "absent", and a corrupted entry is cleared so the failure does
/// not recur on every read.
pub async fn load(kv: &KvStore) -> Option<SessionRecord> {
    match kv.get_json::<SessionRecord>(SESSION_KEY).await {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "session record unreadable; clearing");
            if let Err(e) = kv.delete(SESSION_KEY).await {
                warn!(error = %e, "failed to clear corrupted session record");
            }
            None
        }
    }
}

pub async fn save(kv: &KvStore, record: &SessionRecord) -> anyhow::Result<()> {
    kv.put_json(SESSION_KEY, record).await
}

pub async fn clear(kv: &KvStore) -> anyhow::Result<()> {
    kv.delete(SESSION_KEY).await
}

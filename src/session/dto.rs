use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo::SessionRecord;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub code: String,
}

/// The session as returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicSession {
    pub name: String,
    pub code: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<SessionRecord> for PublicSession {
    fn from(record: SessionRecord) -> Self {
        Self {
            name: record.name,
            code: record.code,
            created_at: record.created_at,
        }
    }
}

/// Response returned after login. `persisted` is false when the record could
/// not be durably written.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: PublicSession,
    pub persisted: bool,
}

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{error, warn};

use crate::kv::KvStore;

use super::repo::{self, SessionRecord};

/// Minimum display-name length after trimming (the original sign-in form
/// rule).
pub(crate) fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// Member codes are opaque but shaped: at least four characters, letters,
/// digits or dashes.
pub(crate) fn is_valid_code(code: &str) -> bool {
    lazy_static! {
        static ref CODE_RE: Regex = Regex::new(r"^[A-Za-z0-9-]{4,}$").unwrap();
    }
    CODE_RE.is_match(code)
}

pub struct LoginOutcome {
    pub record: SessionRecord,
    /// False when the persistence write failed; the in-memory record is still
    /// valid for this process, but will not survive it.
    pub persisted: bool,
}

/// Creates a fresh session, overwriting any prior record. Never fails: a
/// persistence failure is reported through `persisted`, not an error.
pub async fn login(kv: &KvStore, name: &str, code: &str) -> LoginOutcome {
    let record = SessionRecord {
        name: name.trim().to_string(),
        code: code.trim().to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    let persisted = match repo::save(kv, &record).await {
        Ok(()) => true,
        Err(e) => {
            error!(error = %e, "session write failed; continuing with in-memory record");
            false
        }
    };
    LoginOutcome { record, persisted }
}

/// Removes the session unconditionally; logging out while logged out is a
/// no-op. Persistence errors are absorbed here, per the store's contract.
pub async fn logout(kv: &KvStore) {
    if let Err(e) = repo::clear(kv).await {
        warn!(error = %e, "session clear failed");
    }
}

pub async fn current_user(kv: &KvStore) -> Option<SessionRecord> {
    repo::load(kv).await
}

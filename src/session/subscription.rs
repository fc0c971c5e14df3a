use serde::Serialize;
use time::{Duration, OffsetDateTime};

use super::repo::SessionRecord;

const MILLIS_PER_DAY: i128 = 86_400_000;

/// Derived trial state; recomputed from the session record on every query and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionStatus {
    pub active: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    pub days_remaining: i64,
}

impl SubscriptionStatus {
    fn absent() -> Self {
        Self {
            active: false,
            expires_at: None,
            days_remaining: 0,
        }
    }
}

/// Pure in `(created_at, now)`. The trial boundary is exclusive: exactly at
/// expiry the status reads inactive with zero days remaining. Days are
/// ceiling-rounded, never negative.
pub fn evaluate(
    record: Option<&SessionRecord>,
    now: OffsetDateTime,
    trial_days: i64,
) -> SubscriptionStatus {
    let Some(record) = record else {
        return SubscriptionStatus::absent();
    };
    let expires_at = record.created_at + Duration::days(trial_days);
    // Millisecond precision: whole seconds would truncate a sub-second
    // remainder to zero while the trial is still active.
    let remaining = (expires_at - now).whole_milliseconds();
    let days_remaining = if remaining <= 0 {
        0
    } else {
        ((remaining + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as i64
    };
    SubscriptionStatus {
        active: now < expires_at,
        expires_at: Some(expires_at),
        days_remaining,
    }
}

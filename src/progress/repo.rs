use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::kv::KvStore;

/// Storage key for the journal document; versioned so a future shape change
/// can migrate by key.
pub const PROGRESS_KEY: &str = "progress_v1";

/// The whole journal is one JSON document, read and written atomically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressJournal {
    #[serde(default)]
    pub weights: Vec<WeightEntry>,
    #[serde(default)]
    pub measurements: Vec<MeasurementEntry>,
    #[serde(default)]
    pub prs: Vec<PrEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub waist: f64,
    pub chest: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrEntry {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub squat: f64,
    pub bench: f64,
    pub deadlift: f64,
}

/// A missing or corrupted journal reads as empty; the next append overwrites
/// whatever was there.
pub async fn load(kv: &KvStore) -> ProgressJournal {
    match kv.get_json::<ProgressJournal>(PROGRESS_KEY).await {
        Ok(Some(journal)) => journal,
        Ok(None) => ProgressJournal::default(),
        Err(e) => {
            warn!(error = %e, "progress journal unreadable; starting empty");
            ProgressJournal::default()
        }
    }
}

pub async fn save(kv: &KvStore, journal: &ProgressJournal) -> anyhow::Result<()> {
    kv.put_json(PROGRESS_KEY, journal).await
}

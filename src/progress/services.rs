use time::OffsetDateTime;
use uuid::Uuid;

use crate::kv::KvStore;

use super::repo::{self, MeasurementEntry, PrEntry, ProgressJournal, WeightEntry};

/// How many weight points the charts plot.
pub const DEFAULT_WEIGHT_WINDOW: usize = 20;

pub async fn journal(kv: &KvStore) -> ProgressJournal {
    repo::load(kv).await
}

pub async fn add_weight(kv: &KvStore, value: f64) -> anyhow::Result<WeightEntry> {
    let entry = WeightEntry {
        id: Uuid::new_v4(),
        date: OffsetDateTime::now_utc(),
        value,
    };
    let mut journal = repo::load(kv).await;
    journal.weights.push(entry.clone());
    repo::save(kv, &journal).await?;
    Ok(entry)
}

pub async fn add_measurement(
    kv: &KvStore,
    waist: f64,
    chest: f64,
) -> anyhow::Result<MeasurementEntry> {
    let entry = MeasurementEntry {
        id: Uuid::new_v4(),
        date: OffsetDateTime::now_utc(),
        waist,
        chest,
    };
    let mut journal = repo::load(kv).await;
    journal.measurements.push(entry.clone());
    repo::save(kv, &journal).await?;
    Ok(entry)
}

pub async fn add_pr(
    kv: &KvStore,
    squat: f64,
    bench: f64,
    deadlift: f64,
) -> anyhow::Result<PrEntry> {
    let entry = PrEntry {
        id: Uuid::new_v4(),
        date: OffsetDateTime::now_utc(),
        squat,
        bench,
        deadlift,
    };
    let mut journal = repo::load(kv).await;
    journal.prs.push(entry.clone());
    repo::save(kv, &journal).await?;
    Ok(entry)
}

/// The most recent `limit` weight entries, oldest first (append order).
pub async fn recent_weights(kv: &KvStore, limit: usize) -> Vec<WeightEntry> {
    let journal = repo::load(kv).await;
    let skip = journal.weights.len().saturating_sub(limit);
    journal.weights.into_iter().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::test_pool;

    async fn store() -> KvStore {
        KvStore::new(test_pool().await, "yaseer_")
    }

    #[tokio::test]
    async fn entries_append_in_order() {
        let kv = store().await;
        add_weight(&kv, 82.0).await.unwrap();
        add_weight(&kv, 81.4).await.unwrap();
        add_measurement(&kv, 84.0, 104.0).await.unwrap();
        add_pr(&kv, 140.0, 100.0, 180.0).await.unwrap();

        let j = journal(&kv).await;
        let values: Vec<f64> = j.weights.iter().map(|w| w.value).collect();
        assert_eq!(values, [82.0, 81.4]);
        assert_eq!(j.measurements.len(), 1);
        assert_eq!(j.prs.len(), 1);
        assert_eq!(j.prs[0].deadlift, 180.0);
    }

    #[tokio::test]
    async fn recent_weights_keeps_the_tail() {
        let kv = store().await;
        for i in 0..25 {
            add_weight(&kv, 80.0 + i as f64).await.unwrap();
        }
        let recent = recent_weights(&kv, DEFAULT_WEIGHT_WINDOW).await;
        assert_eq!(recent.len(), 20);
        assert_eq!(recent.first().map(|w| w.value), Some(85.0));
        assert_eq!(recent.last().map(|w| w.value), Some(104.0));
    }

    #[tokio::test]
    async fn corrupted_journal_reads_empty_and_recovers() {
        let kv = store().await;
        kv.put_raw(repo::PROGRESS_KEY, "[not, the, right, shape]")
            .await
            .unwrap();
        assert!(journal(&kv).await.weights.is_empty());

        // The next append replaces the corrupted document.
        add_weight(&kv, 79.0).await.unwrap();
        let j = journal(&kv).await;
        assert_eq!(j.weights.len(), 1);
    }
}

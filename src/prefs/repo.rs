use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::kv::KvStore;

pub const LANG_KEY: &str = "lang";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ar,
    En,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// A missing or unrecognized stored value reads as the default (Arabic,
/// light); the site must always have a usable preference pair.
pub async fn lang(kv: &KvStore) -> Lang {
    read_or_default(kv, LANG_KEY).await
}

pub async fn theme(kv: &KvStore) -> Theme {
    read_or_default(kv, THEME_KEY).await
}

pub async fn set_lang(kv: &KvStore, lang: Lang) -> anyhow::Result<()> {
    kv.put_json(LANG_KEY, &lang).await
}

pub async fn set_theme(kv: &KvStore, theme: Theme) -> anyhow::Result<()> {
    kv.put_json(THEME_KEY, &theme).await
}

async fn read_or_default<T>(kv: &KvStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match kv.get_json::<T>(key).await {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "preference unreadable; using default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::test_pool;

    async fn store() -> KvStore {
        KvStore::new(test_pool().await, "yaseer_")
    }

    #[tokio::test]
    async fn defaults_are_arabic_and_light() {
        let kv = store().await;
        assert_eq!(lang(&kv).await, Lang::Ar);
        assert_eq!(theme(&kv).await, Theme::Light);
    }

    #[tokio::test]
    async fn set_then_read_back() {
        let kv = store().await;
        set_lang(&kv, Lang::En).await.unwrap();
        set_theme(&kv, Theme::Dark).await.unwrap();
        assert_eq!(lang(&kv).await, Lang::En);
        assert_eq!(theme(&kv).await, Theme::Dark);
    }

    #[tokio::test]
    async fn unrecognized_stored_value_reads_as_default() {
        let kv = store().await;
        kv.put_raw(LANG_KEY, "\"fr\"").await.unwrap();
        assert_eq!(lang(&kv).await, Lang::Ar);
    }
}

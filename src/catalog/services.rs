use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::dto::{ProgramFilter, ProgramView};
use super::repo_types::{Goal, NutritionDoc, Plan, ProgramsDoc, SampleDay, Sport};
use super::source::CatalogSource;

pub const PROGRAMS_DOC: &str = "programs.json";
pub const NUTRITION_DOC: &str = "nutrition.json";

/// Cloneable so every sharer of a failed load sees the same error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog document {0} unavailable: {1}")]
    Unavailable(String, String),
    #[error("catalog document {0} malformed: {1}")]
    Malformed(String, String),
}

type LoadFuture<T> = Shared<BoxFuture<'static, Result<Arc<T>, CatalogError>>>;

enum DocState<T> {
    Unloaded,
    Loading(LoadFuture<T>),
    Ready(Arc<T>),
}

/// Lazily loaded, immutable-once-loaded document cell.
///
/// Concurrent first-time callers share one in-flight load and all see the
/// same data or the same error. A failed load is not cached: the next call
/// starts a fresh one.
struct LazyDoc<T> {
    state: Mutex<DocState<T>>,
}

impl<T: Send + Sync + 'static> LazyDoc<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(DocState::Unloaded),
        }
    }

    async fn get_or_load<Fut>(&self, load: Fut) -> Result<Arc<T>, CatalogError>
    where
        Fut: Future<Output = Result<Arc<T>, CatalogError>> + Send + 'static,
    {
        let flight = {
            let mut state = self.state.lock().expect("catalog cache lock poisoned");
            match &*state {
                DocState::Ready(doc) => return Ok(doc.clone()),
                DocState::Loading(flight) => flight.clone(),
                DocState::Unloaded => {
                    let flight = load.boxed().shared();
                    *state = DocState::Loading(flight.clone());
                    flight
                }
            }
        };

        let result = flight.await;

        let mut state = self.state.lock().expect("catalog cache lock poisoned");
        if matches!(&*state, DocState::Loading(_)) {
            *state = match &result {
                Ok(doc) => DocState::Ready(doc.clone()),
                Err(_) => DocState::Unloaded,
            };
        }
        result
    }
}

/// Owns the catalog cache; constructed once at startup and handed to the
/// handlers through `AppState`.
pub struct CatalogService {
    source: Arc<dyn CatalogSource>,
    programs: LazyDoc<ProgramsDoc>,
    nutrition: LazyDoc<NutritionDoc>,
}

impl CatalogService {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            programs: LazyDoc::new(),
            nutrition: LazyDoc::new(),
        }
    }

    async fn load_doc<T>(source: Arc<dyn CatalogSource>, name: &'static str) -> Result<Arc<T>, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        let bytes = source.fetch(name).await.map_err(|e| {
            warn!(doc = name, error = %e, "catalog fetch failed");
            CatalogError::Unavailable(name.to_string(), e.to_string())
        })?;
        let doc = serde_json::from_slice::<T>(&bytes).map_err(|e| {
            warn!(doc = name, error = %e, "catalog parse failed");
            CatalogError::Malformed(name.to_string(), e.to_string())
        })?;
        debug!(doc = name, "catalog document loaded");
        Ok(Arc::new(doc))
    }

    async fn programs_doc(&self) -> Result<Arc<ProgramsDoc>, CatalogError> {
        let source = self.source.clone();
        self.programs
            .get_or_load(Self::load_doc(source, PROGRAMS_DOC))
            .await
    }

    async fn nutrition_doc(&self) -> Result<Arc<NutritionDoc>, CatalogError> {
        let source = self.source.clone();
        self.nutrition
            .get_or_load(Self::load_doc(source, NUTRITION_DOC))
            .await
    }

    pub async fn sports(&self) -> Result<Vec<Sport>, CatalogError> {
        Ok(self.programs_doc().await?.sports.clone())
    }

    pub async fn sport_by_id(&self, id: &str) -> Result<Option<Sport>, CatalogError> {
        let doc = self.programs_doc().await?;
        Ok(doc.sports.iter().find(|s| s.id == id).cloned())
    }

    /// Flattens the sport -> level -> program tree into denormalized views,
    /// filtering sport first, then level, then the free/paid dimension.
    /// Output preserves catalog declaration order; no sorting.
    pub async fn all_programs(&self, filter: &ProgramFilter) -> Result<Vec<ProgramView>, CatalogError> {
        let doc = self.programs_doc().await?;
        let mut items = Vec::new();
        for sport in &doc.sports {
            if filter.sport != "all" && sport.id != filter.sport {
                continue;
            }
            for level in &sport.levels {
                if filter.level != "all" && level.id != filter.level {
                    continue;
                }
                for program in &level.programs {
                    if filter.free && !program.is_free {
                        continue;
                    }
                    items.push(ProgramView::denormalize(sport, level, program));
                }
            }
        }
        Ok(items)
    }

    pub async fn sample_day(&self, sport_id: &str) -> Result<Option<SampleDay>, CatalogError> {
        let doc = self.programs_doc().await?;
        Ok(doc.sample_workouts.get(sport_id).cloned())
    }

    pub async fn nutrition_goals(&self) -> Result<Vec<Goal>, CatalogError> {
        Ok(self.nutrition_doc().await?.goals.clone())
    }

    /// Unknown goal ids yield an empty list, not an error.
    pub async fn nutrition_plans(&self, goal_id: &str, free_only: bool) -> Result<Vec<Plan>, CatalogError> {
        let doc = self.nutrition_doc().await?;
        let plans = doc
            .goals
            .iter()
            .find(|g| g.id == goal_id)
            .map(|g| g.plans.clone())
            .unwrap_or_default();
        if free_only {
            Ok(plans.into_iter().filter(|p| p.is_free).collect())
        } else {
            Ok(plans)
        }
    }

    pub async fn nutrition_plan_by_id(
        &self,
        goal_id: &str,
        plan_id: &str,
    ) -> Result<Option<Plan>, CatalogError> {
        let plans = self.nutrition_plans(goal_id, false).await?;
        Ok(plans.into_iter().find(|p| p.id == plan_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // Double-hash delimiter: the color values contain `"#`.
    const PROGRAMS_FIXTURE: &str = r##"{
        "sports": [
            {
                "id": "kickboxing",
                "name": {"ar": "كيك بوكسينج", "en": "Kickboxing"},
                "description": {"ar": "وصف", "en": "desc"},
                "color": "#ef4444",
                "levels": [
                    {
                        "id": "beginner",
                        "name": {"ar": "مبتدئ", "en": "Beginner"},
                        "programs": [
                            {"id": "kb-1", "name": {"ar": "أ", "en": "a"}, "description": {"ar": "و", "en": "d"}, "isFree": true},
                            {"id": "kb-2", "name": {"ar": "ب", "en": "b"}, "description": {"ar": "و", "en": "d"}, "isFree": false, "price": 39}
                        ]
                    },
                    {
                        "id": "advanced",
                        "name": {"ar": "متقدم", "en": "Advanced"},
                        "programs": [
                            {"id": "kb-3", "name": {"ar": "ج", "en": "c"}, "description": {"ar": "و", "en": "d"}, "isFree": false, "price": 59}
                        ]
                    }
                ]
            },
            {
                "id": "yoga",
                "name": {"ar": "يوغا", "en": "Yoga"},
                "description": {"ar": "وصف", "en": "desc"},
                "color": "#f59e0b",
                "levels": [
                    {
                        "id": "beginner",
                        "name": {"ar": "مبتدئ", "en": "Beginner"},
                        "programs": [
                            {"id": "yg-1", "name": {"ar": "د", "en": "e"}, "description": {"ar": "و", "en": "d"}, "isFree": true}
                        ]
                    }
                ]
            }
        ],
        "sampleWorkouts": {
            "kickboxing": {
                "warmup": [{"ar": "إحماء", "en": "warmup"}],
                "main": [{"ar": "أساسي", "en": "main"}],
                "cooldown": [{"ar": "تهدئة", "en": "cooldown"}]
            }
        }
    }"##;

    const NUTRITION_FIXTURE: &str = r#"{
        "goals": [
            {
                "id": "fatloss",
                "name": {"ar": "حرق دهون", "en": "Fat Loss"},
                "plans": [
                    {"id": "basic", "name": {"ar": "أساسي", "en": "Basic"}, "isFree": true},
                    {"id": "pro", "name": {"ar": "احترافي", "en": "Pro"}, "isFree": false, "price": 49}
                ]
            }
        ]
    }"#;

    struct FakeSource {
        fetches: AtomicUsize,
        fail: bool,
        delay: Option<Duration>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail: false,
                delay: None,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn slow() -> Self {
            Self {
                delay: Some(Duration::from_millis(50)),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn fetch(&self, name: &str) -> anyhow::Result<Vec<u8>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("catalog backend down");
            }
            match name {
                PROGRAMS_DOC => Ok(PROGRAMS_FIXTURE.as_bytes().to_vec()),
                NUTRITION_DOC => Ok(NUTRITION_FIXTURE.as_bytes().to_vec()),
                other => anyhow::bail!("unknown document {other}"),
            }
        }
    }

    fn service(source: FakeSource) -> (Arc<CatalogService>, Arc<FakeSource>) {
        let source = Arc::new(source);
        (
            Arc::new(CatalogService::new(source.clone())),
            source,
        )
    }

    #[tokio::test]
    async fn flatten_all_preserves_declaration_order() {
        let (svc, _) = service(FakeSource::new());
        let items = svc.all_programs(&ProgramFilter::default()).await.unwrap();
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["kb-1", "kb-2", "kb-3", "yg-1"]);
    }

    #[tokio::test]
    async fn sport_and_level_filter() {
        let (svc, _) = service(FakeSource::new());
        let filter = ProgramFilter {
            sport: "kickboxing".into(),
            level: "beginner".into(),
            free: false,
        };
        let items = svc.all_programs(&filter).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items
            .iter()
            .all(|p| p.sport_id == "kickboxing" && p.level_id == "beginner"));
        // Denormalized parent context is carried on each item.
        assert_eq!(items[0].color, "#ef4444");
        assert_eq!(items[0].sport_name.en, "Kickboxing");
        assert_eq!(items[0].level_name.en, "Beginner");
    }

    #[tokio::test]
    async fn free_filter_keeps_only_free_programs() {
        let (svc, _) = service(FakeSource::new());
        let filter = ProgramFilter {
            free: true,
            ..ProgramFilter::default()
        };
        let items = svc.all_programs(&filter).await.unwrap();
        let ids: Vec<&str> = items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["kb-1", "yg-1"]);
    }

    #[tokio::test]
    async fn unknown_sport_filter_yields_empty() {
        let (svc, _) = service(FakeSource::new());
        let filter = ProgramFilter {
            sport: "swimming".into(),
            ..ProgramFilter::default()
        };
        assert!(svc.all_programs(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn catalog_is_fetched_once_across_accessors() {
        let (svc, source) = service(FakeSource::new());
        svc.sports().await.unwrap();
        svc.sport_by_id("yoga").await.unwrap();
        svc.all_programs(&ProgramFilter::default()).await.unwrap();
        svc.sample_day("kickboxing").await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_access_is_single_flight() {
        let (svc, source) = service(FakeSource::slow());
        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let svc = svc.clone();
                tokio::spawn(async move { svc.all_programs(&ProgramFilter::default()).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().len(), 4);
        }
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn load_failure_surfaces_and_next_call_retries() {
        let (svc, source) = service(FakeSource::failing());
        let err = svc.sports().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_, _)));
        // Failure is not cached; a later call issues a fresh fetch.
        let err = svc.sports().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_, _)));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn malformed_document_is_a_parse_error() {
        struct Garbage;
        #[async_trait]
        impl CatalogSource for Garbage {
            async fn fetch(&self, _name: &str) -> anyhow::Result<Vec<u8>> {
                Ok(b"{\"sports\": 42}".to_vec())
            }
        }
        let svc = CatalogService::new(Arc::new(Garbage));
        let err = svc.sports().await.unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_, _)));
    }

    #[tokio::test]
    async fn unknown_goal_yields_empty_plans() {
        let (svc, _) = service(FakeSource::new());
        assert!(svc
            .nutrition_plans("nonexistent-goal", false)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn plan_lookup_by_id() {
        let (svc, _) = service(FakeSource::new());
        let plan = svc.nutrition_plan_by_id("fatloss", "pro").await.unwrap();
        assert_eq!(plan.unwrap().price, 49.0);
        assert!(svc
            .nutrition_plan_by_id("fatloss", "missing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn free_plans_filter() {
        let (svc, _) = service(FakeSource::new());
        let plans = svc.nutrition_plans("fatloss", true).await.unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, "basic");
    }

    #[tokio::test]
    async fn sample_day_absent_for_unknown_sport() {
        let (svc, _) = service(FakeSource::new());
        assert!(svc.sample_day("kickboxing").await.unwrap().is_some());
        assert!(svc.sample_day("chess").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn shipped_catalog_documents_parse() {
        use super::super::source::FsCatalogSource;
        let svc = CatalogService::new(Arc::new(FsCatalogSource::new("data".into())));
        assert_eq!(svc.sports().await.unwrap().len(), 6);
        assert_eq!(svc.nutrition_goals().await.unwrap().len(), 2);
    }
}

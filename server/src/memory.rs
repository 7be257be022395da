use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rocket::fairing::AdHoc;
use rocket::tokio::sync::RwLock;
use shared::{StreakId, StreakRecord};

use crate::clock::Clock;
use crate::service::StreakService;
use crate::store::{StoredStreak, StreakStore, Version};

/// Process local store. Used by tests and `STORAGE=memory`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    streaks: RwLock<HashMap<StreakId, StoredStreak>>,
}

#[async_trait]
impl StreakStore for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<StreakRecord>> {
        let streaks = self.streaks.read().await;
        let mut records: Vec<StreakRecord> =
            streaks.values().map(|s| s.record.clone()).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get(&self, id: StreakId) -> anyhow::Result<Option<StoredStreak>> {
        Ok(self.streaks.read().await.get(&id).cloned())
    }

    async fn create(&self, record: &StreakRecord) -> anyhow::Result<()> {
        let mut streaks = self.streaks.write().await;
        if streaks.contains_key(&record.id) {
            anyhow::bail!("streak {} already exists", record.id);
        }
        streaks.insert(
            record.id,
            StoredStreak {
                record: record.clone(),
                version: 0,
            },
        );
        Ok(())
    }

    async fn put(
        &self,
        record: &StreakRecord,
        expected: Version,
    ) -> anyhow::Result<Option<Version>> {
        let mut streaks = self.streaks.write().await;
        let Some(stored) = streaks.get_mut(&record.id) else {
            return Ok(None);
        };
        if stored.version != expected {
            return Ok(None);
        }

        stored.record = record.clone();
        stored.version += 1;
        Ok(Some(stored.version))
    }

    async fn delete(&self, id: StreakId) -> anyhow::Result<bool> {
        Ok(self.streaks.write().await.remove(&id).is_some())
    }
}

pub fn stage(clock: Arc<dyn Clock>) -> AdHoc {
    AdHoc::on_ignite("In-memory storage", move |rocket| async move {
        tracing::warn!("Using in-memory storage, streaks are lost on restart");
        let store: Arc<dyn StreakStore> = Arc::new(MemoryStore::default());
        rocket.manage(StreakService::new(store, clock))
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};
    use shared::NewStreak;
    use uuid::Uuid;

    use super::*;

    fn record(name: &str, age_in_minutes: i64) -> StreakRecord {
        NewStreak::new(name, None)
            .into_record(Uuid::new_v4(), Utc::now() - Duration::minutes(age_in_minutes))
    }

    #[rocket::async_test]
    async fn lists_newest_first() {
        let store = MemoryStore::default();
        for (name, age) in [("old", 30), ("newest", 1), ("middle", 10)] {
            store.create(&record(name, age)).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["newest", "middle", "old"]);
    }

    #[rocket::async_test]
    async fn put_checks_version() {
        let store = MemoryStore::default();
        let streak = record("Walk", 0);
        store.create(&streak).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let updated = streak.mark_complete(day);
        assert_eq!(store.put(&updated, 0).await.unwrap(), Some(1));
        // stale writer
        assert_eq!(store.put(&updated, 0).await.unwrap(), None);

        let stored = store.get(streak.id).await.unwrap().unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.record, updated);
    }

    #[rocket::async_test]
    async fn create_rejects_duplicate_id() {
        let store = MemoryStore::default();
        let streak = record("Walk", 0);
        store.create(&streak).await.unwrap();
        assert!(store.create(&streak).await.is_err());
    }

    #[rocket::async_test]
    async fn delete_and_put_missing() {
        let store = MemoryStore::default();
        let streak = record("Walk", 0);
        store.create(&streak).await.unwrap();

        assert!(store.delete(streak.id).await.unwrap());
        assert!(!store.delete(streak.id).await.unwrap());
        assert_eq!(store.get(streak.id).await.unwrap(), None);
        assert_eq!(store.put(&streak, 0).await.unwrap(), None);
    }
}

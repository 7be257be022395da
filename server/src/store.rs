use async_trait::async_trait;
use shared::{StreakId, StreakRecord};

/// Incremented by the store on every successful [`StreakStore::put`].
pub type Version = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredStreak {
    pub record: StreakRecord,
    pub version: Version,
}

/// Record storage used by [`crate::service::StreakService`].
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// All records, most recently created first.
    async fn list(&self) -> anyhow::Result<Vec<StreakRecord>>;

    async fn get(&self, id: StreakId) -> anyhow::Result<Option<StoredStreak>>;

    async fn create(&self, record: &StreakRecord) -> anyhow::Result<()>;

    /// Replaces the stored record if its version is still `expected`.
    /// Returns the new version, or `None` if the record changed or is gone.
    async fn put(&self, record: &StreakRecord, expected: Version)
        -> anyhow::Result<Option<Version>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: StreakId) -> anyhow::Result<bool>;
}

use std::sync::Arc;

use shared::{Day, NewStreak, StreakId, StreakRecord, Transition};
use tracing::instrument;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{Result, StreakError};
use crate::store::StreakStore;

/// Attempts of the load, complete, put cycle before giving up on a record
/// that keeps changing underneath.
const MAX_COMPLETE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub record: StreakRecord,
    pub transition: Transition,
    /// Day the completion was made for.
    pub day: Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total_streaks: usize,
    /// Completed today or yesterday.
    pub active_streaks: usize,
    pub completed_today: usize,
}

#[derive(Clone)]
pub struct StreakService {
    store: Arc<dyn StreakStore>,
    clock: Arc<dyn Clock>,
}

impl StreakService {
    pub fn new(store: Arc<dyn StreakStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> Day {
        self.clock.today()
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<StreakRecord>> {
        Ok(self.store.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: StreakId) -> Result<StreakRecord> {
        self.store
            .get(id)
            .await?
            .map(|stored| stored.record)
            .ok_or(StreakError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn create(&self, new: NewStreak) -> Result<StreakRecord> {
        let new = new.normalized().ok_or(StreakError::InvalidName)?;
        let record = new.into_record(Uuid::new_v4(), self.clock.now());
        self.store.create(&record).await?;

        tracing::info!("Created streak {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Marks the streak as completed for the clock's today and persists the
    /// result. Completing twice on the same day returns the stored record.
    #[instrument(skip(self))]
    pub async fn complete_today(&self, id: StreakId) -> Result<Completion> {
        let today = self.clock.today();

        for attempt in 1..=MAX_COMPLETE_ATTEMPTS {
            let stored = self.store.get(id).await?.ok_or(StreakError::NotFound(id))?;
            let transition = stored.record.transition(today);
            if transition == Transition::AlreadyCompleted {
                return Ok(Completion {
                    record: stored.record,
                    transition,
                    day: today,
                });
            }

            let record = stored.record.mark_complete(today);
            if self.store.put(&record, stored.version).await?.is_some() {
                tracing::info!(
                    "Streak {id} {transition} on {today}: current {}, longest {}",
                    record.current_streak,
                    record.longest_streak
                );
                return Ok(Completion {
                    record,
                    transition,
                    day: today,
                });
            }

            tracing::debug!("Streak {id} changed during completion, attempt {attempt}");
        }

        tracing::warn!("Giving up completing streak {id} after {MAX_COMPLETE_ATTEMPTS} attempts");
        Err(StreakError::Conflict(id))
    }

    /// Deleting a missing streak is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: StreakId) -> Result<bool> {
        let deleted = self.store.delete(id).await?;
        if !deleted {
            tracing::debug!("Streak {id} was already gone");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    pub async fn summary(&self) -> Result<Summary> {
        let today = self.clock.today();
        let records = self.store.list().await?;

        Ok(Summary {
            total_streaks: records.len(),
            active_streaks: records
                .iter()
                .filter(|r| r.status(today).is_alive())
                .count(),
            completed_today: records
                .iter()
                .filter(|r| r.is_completed_today(today))
                .count(),
        })
    }
}

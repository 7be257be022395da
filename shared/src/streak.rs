use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::*;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StreakStatus {
    /// Never completed.
    New,
    /// Completed today.
    Completed,
    /// Completed yesterday, today is still open.
    Active,
    /// Last completion is neither today nor yesterday. Covers dates in the
    /// future as well.
    Broken,
}

impl StreakStatus {
    /// The streak has not been lost yet.
    pub const fn is_alive(&self) -> bool {
        matches!(self, Self::Completed | Self::Active)
    }
}

/// What a completion on a given day does to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Transition {
    AlreadyCompleted,
    Extended,
    Reset,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub id: StreakId,
    pub name: String,
    pub description: Option<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_completed: Option<Day>,
    pub completed_dates: BTreeSet<Day>,
    pub created_at: DateTime<Utc>,
}

impl StreakRecord {
    pub fn new(
        id: StreakId,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            current_streak: 0,
            longest_streak: 0,
            last_completed: None,
            completed_dates: BTreeSet::new(),
            created_at,
        }
    }

    pub fn transition(&self, today: Day) -> Transition {
        if self.completed_dates.contains(&today) {
            return Transition::AlreadyCompleted;
        }

        match self.last_completed {
            None => Transition::Extended,
            Some(last) if Some(last) == previous_day(today) => Transition::Extended,
            Some(_) => Transition::Reset,
        }
    }

    /// Returns the record with `today` marked as completed. Completing the
    /// same day twice returns an equal record.
    pub fn mark_complete(&self, today: Day) -> Self {
        let current_streak = match self.transition(today) {
            Transition::AlreadyCompleted => return self.clone(),
            Transition::Extended => self.current_streak.saturating_add(1),
            Transition::Reset => 1,
        };

        let mut completed_dates = self.completed_dates.clone();
        completed_dates.insert(today);

        Self {
            current_streak,
            longest_streak: self.longest_streak.max(current_streak),
            last_completed: Some(today),
            completed_dates,
            ..self.clone()
        }
    }

    pub fn is_completed_today(&self, today: Day) -> bool {
        self.completed_dates.contains(&today)
    }

    pub fn status(&self, today: Day) -> StreakStatus {
        match self.last_completed {
            None => StreakStatus::New,
            Some(last) if last == today => StreakStatus::Completed,
            Some(last) if Some(last) == previous_day(today) => StreakStatus::Active,
            Some(_) => StreakStatus::Broken,
        }
    }

    pub fn total_completions(&self) -> usize {
        self.completed_dates.len()
    }
}

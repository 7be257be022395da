use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod day;
mod streak;

pub use day::*;
pub use streak::*;

pub use strum::IntoEnumIterator;

pub type StreakId = Uuid;

/// Input of the create operation, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NewStreak {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewStreak {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Trims both fields. Returns `None` when the name is blank.
    /// A blank description is dropped.
    pub fn normalized(&self) -> Option<Self> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToOwned::to_owned);

        Some(Self {
            name: name.to_owned(),
            description,
        })
    }

    pub fn into_record(self, id: StreakId, created_at: DateTime<Utc>) -> StreakRecord {
        StreakRecord::new(id, self.name, self.description, created_at)
    }
}

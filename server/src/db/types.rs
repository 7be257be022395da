use anyhow::Context;
use chrono::{DateTime, Utc};
use shared::{day_string, parse_day, StreakRecord};
use uuid::Uuid;

use crate::store::StoredStreak;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StreakRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_completed: Option<String>,
    pub completed_dates: Vec<String>,
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<StreakRow> for StoredStreak {
    type Error = anyhow::Error;

    fn try_from(row: StreakRow) -> Result<Self, Self::Error> {
        let last_completed = row
            .last_completed
            .as_deref()
            .map(|day| parse_day(day).with_context(|| format!("invalid last_completed {day:?}")))
            .transpose()?;
        let completed_dates = row
            .completed_dates
            .iter()
            .map(|day| parse_day(day).with_context(|| format!("invalid completed date {day:?}")))
            .collect::<anyhow::Result<_>>()?;

        let record = StreakRecord {
            id: row.id,
            name: row.name,
            description: row.description,
            current_streak: row.current_streak.try_into()?,
            longest_streak: row.longest_streak.try_into()?,
            last_completed,
            completed_dates,
            created_at: row.created_at,
        };

        Ok(StoredStreak {
            record,
            version: row.version,
        })
    }
}

/// Mutable columns of a record in their stored form.
pub struct StreakColumns {
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_completed: Option<String>,
    pub completed_dates: Vec<String>,
}

impl TryFrom<&StreakRecord> for StreakColumns {
    type Error = anyhow::Error;

    fn try_from(record: &StreakRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            current_streak: i32::try_from(record.current_streak)
                .with_context(|| format!("current_streak {} out of range", record.current_streak))?,
            longest_streak: i32::try_from(record.longest_streak)
                .with_context(|| format!("longest_streak {} out of range", record.longest_streak))?,
            last_completed: record.last_completed.map(day_string),
            completed_dates: record.completed_dates.iter().copied().map(day_string).collect(),
        })
    }
}

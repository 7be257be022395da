use std::sync::Arc;

use async_trait::async_trait;
use rocket::{
    fairing::{self, AdHoc},
    Build, Rocket,
};
use rocket_db_pools::Database;
use shared::{StreakId, StreakRecord};
use sqlx::PgPool;
use tracing::instrument;

use crate::clock::Clock;
use crate::service::StreakService;
use crate::store::{StoredStreak, StreakStore, Version};

pub mod types;

use types::{StreakColumns, StreakRow};

#[derive(Database, Clone, Debug)]
#[database("streaks")]
pub struct DB(PgPool);

#[async_trait]
impl StreakStore for DB {
    #[instrument(skip(self))]
    async fn list(&self) -> anyhow::Result<Vec<StreakRecord>> {
        let rows: Vec<StreakRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, current_streak, longest_streak,
                   last_completed, completed_dates, version, created_at
            FROM streaks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.0)
        .await?;

        rows.into_iter()
            .map(|row| StoredStreak::try_from(row).map(|stored| stored.record))
            .collect()
    }

    #[instrument(skip(self))]
    async fn get(&self, id: StreakId) -> anyhow::Result<Option<StoredStreak>> {
        let row: Option<StreakRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, current_streak, longest_streak,
                   last_completed, completed_dates, version, created_at
            FROM streaks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.0)
        .await?;

        row.map(StoredStreak::try_from).transpose()
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn create(&self, record: &StreakRecord) -> anyhow::Result<()> {
        let columns = StreakColumns::try_from(record)?;
        sqlx::query(
            r#"
            INSERT INTO streaks (id, name, description, current_streak, longest_streak,
                                 last_completed, completed_dates, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.description)
        .bind(columns.current_streak)
        .bind(columns.longest_streak)
        .bind(columns.last_completed)
        .bind(columns.completed_dates)
        .bind(record.created_at)
        .execute(&self.0)
        .await?;

        Ok(())
    }

    #[instrument(skip(self, record), fields(id = %record.id))]
    async fn put(
        &self,
        record: &StreakRecord,
        expected: Version,
    ) -> anyhow::Result<Option<Version>> {
        let columns = StreakColumns::try_from(record)?;
        let version: Option<Version> = sqlx::query_scalar(
            r#"
            UPDATE streaks
            SET current_streak = $2,
                longest_streak = $3,
                last_completed = $4,
                completed_dates = $5,
                version = version + 1
            WHERE id = $1 AND version = $6
            RETURNING version
            "#,
        )
        .bind(record.id)
        .bind(columns.current_streak)
        .bind(columns.longest_streak)
        .bind(columns.last_completed)
        .bind(columns.completed_dates)
        .bind(expected)
        .fetch_optional(&self.0)
        .await?;

        Ok(version)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: StreakId) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM streaks WHERE id = $1")
            .bind(id)
            .execute(&self.0)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    match DB::fetch(&rocket) {
        Some(db) => match sqlx::migrate!("./migrations").run(&**db).await {
            Ok(_) => Ok(rocket),
            Err(e) => {
                tracing::error!("Failed to initialize SQLx database: {}", e);
                Err(rocket)
            }
        },
        None => Err(rocket),
    }
}

pub fn stage(clock: Arc<dyn Clock>) -> AdHoc {
    AdHoc::on_ignite("SQLx Stage", move |rocket| async move {
        rocket
            .attach(DB::init())
            .attach(AdHoc::try_on_ignite("SQLx Migrations", run_migrations))
            .attach(AdHoc::try_on_ignite(
                "Streak service",
                move |rocket| async move {
                    match DB::fetch(&rocket) {
                        Some(db) => {
                            let store: Arc<dyn StreakStore> = Arc::new(db.clone());
                            Ok(rocket.manage(StreakService::new(store, clock)))
                        }
                        None => Err(rocket),
                    }
                },
            ))
    })
}

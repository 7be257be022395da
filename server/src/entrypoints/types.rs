use chrono::{DateTime, Utc};
use rocket::{
    http::Status,
    response::{self, Responder},
    serde::json::Json,
    Request, Response,
};
use serde::{Deserialize, Serialize};
use shared::{day_string, Day, NewStreak, StreakRecord, StreakStatus};
use utoipa::ToSchema;

use crate::error::StreakError;
use crate::service::Summary;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
    #[schema(example = "2024-01-02")]
    pub last_completed: Option<String>,
    pub completed_dates: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, example = "active")]
    pub status: StreakStatus,
    pub completed_today: bool,
    pub total_completions: u32,
}

impl StreakResponse {
    pub fn new(record: StreakRecord, today: Day) -> Self {
        Self {
            status: record.status(today),
            completed_today: record.is_completed_today(today),
            total_completions: record.total_completions() as u32,
            id: record.id.to_string(),
            name: record.name,
            description: record.description,
            current_streak: record.current_streak,
            longest_streak: record.longest_streak,
            last_completed: record.last_completed.map(day_string),
            completed_dates: record.completed_dates.into_iter().map(day_string).collect(),
            created_at: record.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateStreakRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateStreakRequest> for NewStreak {
    fn from(request: CreateStreakRequest) -> Self {
        NewStreak::new(request.name, request.description)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_streaks: u32,
    pub active_streaks: u32,
    pub completed_today: u32,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            total_streaks: summary.total_streaks as u32,
            active_streaks: summary.active_streaks as u32,
            completed_today: summary.completed_today as u32,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// JSON error with a status code. Storage failures are reported with the
/// message of the failed operation only.
#[derive(Debug)]
pub struct ApiError {
    status: Status,
    message: String,
}

impl ApiError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(Status::NotFound, "Streak not found")
    }

    pub fn from_service(error: StreakError, operation: &str) -> Self {
        match error {
            StreakError::NotFound(_) => Self::not_found(),
            StreakError::InvalidName => Self::new(Status::BadRequest, error.to_string()),
            StreakError::Conflict(_) => Self::new(Status::Conflict, error.to_string()),
            StreakError::Storage(e) => {
                tracing::error!("{operation}: {e:#}");
                Self::new(Status::InternalServerError, operation)
            }
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let body = Json(ErrorResponse {
            error: self.message,
        })
        .respond_to(req)?;

        Response::build_from(body).status(self.status).ok()
    }
}

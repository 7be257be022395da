use rocket::{http::Status, response::status::Created, serde::json::Json, State};
use shared::StreakId;

use crate::metrics::StreakMetrics;
use crate::service::StreakService;

use super::types::{
    ApiError, CreateStreakRequest, ErrorResponse, StreakResponse, SummaryResponse,
};

// Ids that are not UUIDs cannot exist.
fn parse_id(id: &str) -> Option<StreakId> {
    StreakId::parse_str(id).ok()
}

#[utoipa::path(context_path = "/api", tag = "streaks", responses(
    (status = 200, description = "All streaks, newest first", body = [StreakResponse]),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[get("/streaks")]
pub async fn list_streaks(
    service: &State<StreakService>,
) -> Result<Json<Vec<StreakResponse>>, ApiError> {
    let today = service.today();
    let records = service
        .list()
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch streaks"))?;

    Ok(Json(
        records
            .into_iter()
            .map(|record| StreakResponse::new(record, today))
            .collect(),
    ))
}

#[utoipa::path(context_path = "/api", tag = "streaks", responses(
    (status = 200, description = "Dashboard counters", body = SummaryResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[get("/streaks/summary")]
pub async fn streaks_summary(
    service: &State<StreakService>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = service
        .summary()
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch streaks"))?;
    Ok(Json(summary.into()))
}

#[utoipa::path(context_path = "/api", tag = "streaks", responses(
    (status = 200, description = "Streak", body = StreakResponse),
    (status = 404, description = "Unknown streak", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[get("/streaks/<id>")]
pub async fn get_streak(
    id: &str,
    service: &State<StreakService>,
) -> Result<Json<StreakResponse>, ApiError> {
    let id = parse_id(id).ok_or_else(ApiError::not_found)?;
    let record = service
        .get(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to fetch streak"))?;

    Ok(Json(StreakResponse::new(record, service.today())))
}

#[utoipa::path(context_path = "/api", tag = "streaks", request_body = CreateStreakRequest, responses(
    (status = 201, description = "Created streak", body = StreakResponse),
    (status = 400, description = "Blank name", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[post("/streaks", data = "<request>")]
pub async fn create_streak(
    request: Json<CreateStreakRequest>,
    service: &State<StreakService>,
) -> Result<Created<Json<StreakResponse>>, ApiError> {
    let record = service
        .create(request.into_inner().into())
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to create streak"))?;

    let location = format!("/api/streaks/{}", record.id);
    Ok(Created::new(location).body(Json(StreakResponse::new(record, service.today()))))
}

#[utoipa::path(context_path = "/api", tag = "streaks", responses(
    (status = 200, description = "Streak after today's completion", body = StreakResponse),
    (status = 404, description = "Unknown streak", body = ErrorResponse),
    (status = 409, description = "Streak kept changing during the update", body = ErrorResponse),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[put("/streaks/<id>/complete")]
pub async fn complete_streak(
    id: &str,
    service: &State<StreakService>,
    metrics: &State<StreakMetrics>,
) -> Result<Json<StreakResponse>, ApiError> {
    let id = parse_id(id).ok_or_else(ApiError::not_found)?;
    let completion = service
        .complete_today(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to update streak"))?;
    metrics.record(completion.transition);

    Ok(Json(StreakResponse::new(completion.record, completion.day)))
}

#[utoipa::path(context_path = "/api", tag = "streaks", responses(
    (status = 204, description = "Streak removed or already absent"),
    (status = 500, description = "Storage failure", body = ErrorResponse)
))]
#[delete("/streaks/<id>")]
pub async fn delete_streak(id: &str, service: &State<StreakService>) -> Result<Status, ApiError> {
    let Some(id) = parse_id(id) else {
        return Ok(Status::NoContent);
    };
    service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_service(e, "Failed to delete streak"))?;

    Ok(Status::NoContent)
}

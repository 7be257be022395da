use std::sync::Arc;

use chrono::NaiveDate;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use shared::StreakStatus;
use streak_maintainer_server::{
    clock::FixedClock,
    config::Config,
    entrypoints::{
        types::{ErrorResponse, StreakResponse, SummaryResponse},
        WELCOME_MESSAGE,
    },
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn client() -> (Client, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::new(day(2024, 1, 10)));
    let rocket = streak_maintainer_server::build(&Config::in_memory(), clock.clone()).unwrap();
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    (client, clock)
}

async fn create(client: &Client, body: &str) -> StreakResponse {
    let response = client
        .post("/api/streaks")
        .header(ContentType::JSON)
        .body(body)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    response.into_json().await.unwrap()
}

async fn complete(client: &Client, id: &str) -> StreakResponse {
    let response = client
        .put(format!("/api/streaks/{id}/complete"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    response.into_json().await.unwrap()
}

#[rocket::async_test]
async fn welcome_routes() {
    let (client, _) = client().await;

    for path in ["/", "/api/"] {
        let response = client.get(path).dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().await.unwrap(), WELCOME_MESSAGE);
    }
}

#[rocket::async_test]
async fn create_streak() {
    let (client, _) = client().await;

    let response = client
        .post("/api/streaks")
        .header(ContentType::JSON)
        .body(r#"{"name":"  Read  ","description":"20 pages"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Created);
    let location = response.headers().get_one("Location").unwrap().to_owned();

    let streak: StreakResponse = response.into_json().await.unwrap();
    assert_eq!(location, format!("/api/streaks/{}", streak.id));
    assert_eq!(streak.name, "Read");
    assert_eq!(streak.description.as_deref(), Some("20 pages"));
    assert_eq!(streak.current_streak, 0);
    assert_eq!(streak.longest_streak, 0);
    assert_eq!(streak.last_completed, None);
    assert!(streak.completed_dates.is_empty());
    assert_eq!(streak.status, StreakStatus::New);
    assert!(!streak.completed_today);

    let fetched: StreakResponse = client
        .get(location)
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(fetched.id, streak.id);
}

#[rocket::async_test]
async fn create_requires_name() {
    let (client, _) = client().await;

    let response = client
        .post("/api/streaks")
        .header(ContentType::JSON)
        .body(r#"{"name":"   "}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let error: ErrorResponse = response.into_json().await.unwrap();
    assert_eq!(error.error, "Streak name must not be empty");

    let response = client
        .post("/api/streaks")
        .header(ContentType::JSON)
        .body(r#"{"description":"no name"}"#)
        .dispatch()
        .await;
    assert!(matches!(response.status().code, 400 | 422));
    assert!(response.into_json::<ErrorResponse>().await.is_some());
}

#[rocket::async_test]
async fn list_newest_first() {
    let (client, _) = client().await;
    for name in ["Walk", "Read", "Stretch"] {
        create(&client, &format!(r#"{{"name":"{name}"}}"#)).await;
    }

    let response = client.get("/api/streaks").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let streaks: Vec<StreakResponse> = response.into_json().await.unwrap();
    let names: Vec<&str> = streaks.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Stretch", "Read", "Walk"]);
}

#[rocket::async_test]
async fn completing_streak() {
    let (client, clock) = client().await;
    let id = create(&client, r#"{"name":"Read"}"#).await.id;

    let streak = complete(&client, &id).await;
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.longest_streak, 1);
    assert_eq!(streak.last_completed.as_deref(), Some("2024-01-10"));
    assert_eq!(streak.completed_dates, ["2024-01-10"]);
    assert_eq!(streak.status, StreakStatus::Completed);
    assert!(streak.completed_today);

    // second request on the same day changes nothing
    let again = complete(&client, &id).await;
    assert_eq!(again.current_streak, 1);
    assert_eq!(again.total_completions, 1);

    clock.set_today(day(2024, 1, 11));
    let fetched: StreakResponse = client
        .get(format!("/api/streaks/{id}"))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(fetched.status, StreakStatus::Active);
    assert!(!fetched.completed_today);

    let streak = complete(&client, &id).await;
    assert_eq!(streak.current_streak, 2);
    assert_eq!(streak.completed_dates, ["2024-01-10", "2024-01-11"]);

    clock.set_today(day(2024, 1, 15));
    let streak = complete(&client, &id).await;
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.longest_streak, 2);
    assert_eq!(streak.total_completions, 3);
}

#[rocket::async_test]
async fn unknown_streaks() {
    let (client, _) = client().await;
    let missing = uuid::Uuid::new_v4();

    for path in [
        format!("/api/streaks/{missing}/complete"),
        "/api/streaks/not-a-uuid/complete".to_string(),
    ] {
        let response = client.put(path).dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        let error: ErrorResponse = response.into_json().await.unwrap();
        assert_eq!(error.error, "Streak not found");
    }

    let response = client.get(format!("/api/streaks/{missing}")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn deleting_streak() {
    let (client, _) = client().await;
    let id = create(&client, r#"{"name":"Read"}"#).await.id;

    let response = client.delete(format!("/api/streaks/{id}")).dispatch().await;
    assert_eq!(response.status(), Status::NoContent);

    let response = client.get(format!("/api/streaks/{id}")).dispatch().await;
    assert_eq!(response.status(), Status::NotFound);

    for path in [format!("/api/streaks/{id}"), "/api/streaks/nope".to_string()] {
        let response = client.delete(path).dispatch().await;
        assert_eq!(response.status(), Status::NoContent);
    }
}

#[rocket::async_test]
async fn summary() {
    let (client, clock) = client().await;
    let active = create(&client, r#"{"name":"a"}"#).await.id;
    let done = create(&client, r#"{"name":"b"}"#).await.id;
    create(&client, r#"{"name":"c"}"#).await;

    complete(&client, &active).await;
    clock.set_today(day(2024, 1, 11));
    complete(&client, &done).await;

    let response = client.get("/api/streaks/summary").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let summary: SummaryResponse = response.into_json().await.unwrap();
    assert_eq!(summary.total_streaks, 3);
    assert_eq!(summary.active_streaks, 2);
    assert_eq!(summary.completed_today, 1);
}

#[rocket::async_test]
async fn metrics_count_completions() {
    let (client, _) = client().await;
    let id = create(&client, r#"{"name":"Read"}"#).await.id;
    complete(&client, &id).await;
    complete(&client, &id).await;

    let response = client.get("/metrics").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains(r#"streak_completions_total{outcome="extended"} 1"#));
    assert!(body.contains(r#"streak_completions_total{outcome="already_completed"} 1"#));
}

#[rocket::async_test]
async fn openapi_document() {
    let (client, _) = client().await;

    let response = client.get("/api-docs/openapi.json").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains("/api/streaks/{id}/complete"));
    assert!(body.contains("StreakResponse"));
}

#[rocket::async_test]
async fn cors_allows_configured_origin() {
    let (client, _) = client().await;

    let response = client
        .get("/api/streaks")
        .header(Header::new("Origin", "http://localhost:5173"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("http://localhost:5173")
    );
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Credentials"),
        Some("true")
    );
}

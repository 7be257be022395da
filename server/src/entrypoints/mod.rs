use rocket::{
    fairing::AdHoc,
    http::{Method, Status},
    serde::json::Json,
    Request,
};
use rocket_cors::{AllowedOrigins, Cors, CorsOptions};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod streaks;
pub mod types;

use types::{CreateStreakRequest, ErrorResponse, StreakResponse, SummaryResponse};

pub const WELCOME_MESSAGE: &str = "Welcome to the Streak Maintainer API!";

#[derive(OpenApi)]
#[openapi(
    paths(
        streaks::list_streaks,
        streaks::streaks_summary,
        streaks::get_streak,
        streaks::create_streak,
        streaks::complete_streak,
        streaks::delete_streak,
    ),
    components(schemas(StreakResponse, SummaryResponse, CreateStreakRequest, ErrorResponse)),
    tags((name = "streaks", description = "Daily habits and their streaks"))
)]
pub struct ApiDoc;

#[get("/")]
fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

#[get("/api")]
fn api_welcome() -> &'static str {
    WELCOME_MESSAGE
}

#[catch(default)]
fn default_catcher(status: Status, _: &Request) -> Json<ErrorResponse> {
    let error = match status.code {
        404 => "Not found".to_string(),
        code => status
            .reason()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("Request failed with status {code}")),
    };
    Json(ErrorResponse { error })
}

pub fn cors(origins: &[String]) -> anyhow::Result<Cors> {
    let cors = CorsOptions {
        allowed_origins: AllowedOrigins::some_exact(origins),
        allowed_methods: [Method::Get, Method::Post, Method::Put, Method::Delete]
            .into_iter()
            .map(From::from)
            .collect(),
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()?;

    Ok(cors)
}

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .mount("/", routes![welcome, api_welcome])
            .mount(
                "/api",
                routes![
                    streaks::list_streaks,
                    streaks::streaks_summary,
                    streaks::get_streak,
                    streaks::create_streak,
                    streaks::complete_streak,
                    streaks::delete_streak,
                ],
            )
            .mount(
                "/",
                SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .register("/", catchers![default_catcher])
    })
}

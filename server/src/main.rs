use std::sync::Arc;

use streak_maintainer_server::{clock::SystemClock, config::Config};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;

    let span = tracing::info_span!("Starting Rocket");
    let rocket = {
        let _enter = span.enter();
        streak_maintainer_server::build(&config, Arc::new(SystemClock))?
    };

    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed: {e}"))?;
    tracing::warn!("Server stopped");

    Ok(())
}

#[macro_use]
extern crate rocket;

use std::sync::Arc;

use rocket::{fairing::AdHoc, Build, Rocket};
use rocket_prometheus::PrometheusMetrics;

pub mod clock;
pub mod config;
pub mod db;
pub mod entrypoints;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod service;
pub mod store;

use clock::Clock;
use config::{Config, StorageKind};
use metrics::StreakMetrics;

fn storage_stage(storage: StorageKind, clock: Arc<dyn Clock>) -> AdHoc {
    match storage {
        StorageKind::Postgres => db::stage(clock),
        StorageKind::Memory => memory::stage(clock),
    }
}

pub fn build(config: &Config, clock: Arc<dyn Clock>) -> anyhow::Result<Rocket<Build>> {
    let prometheus = PrometheusMetrics::new();
    let metrics = StreakMetrics::register(&prometheus)?;
    let cors = entrypoints::cors(&config.allowed_origins)?;

    tracing::info!(
        "Building server with {:?} storage on port {}",
        config.storage,
        config.port
    );

    Ok(rocket::custom(config.figment())
        .attach(prometheus.clone())
        .attach(cors)
        .manage(metrics)
        .attach(storage_stage(config.storage, clock))
        .attach(entrypoints::stage())
        .mount("/metrics", prometheus))
}

use rocket::figment::Figment;
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://streakmaintainer.vercel.app",
    "http://localhost:5173",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct Env {
    #[serde(default)]
    storage: StorageKind,
    database_url: Option<String>,
    port: Option<u16>,
    allowed_origins: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageKind,
    pub database_url: Option<String>,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::from_env::<Env>()?.into())
    }

    pub fn in_memory() -> Self {
        Self {
            storage: StorageKind::Memory,
            database_url: None,
            port: DEFAULT_PORT,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn figment(&self) -> Figment {
        let figment = rocket::Config::figment().merge(("port", self.port));
        match &self.database_url {
            Some(url) => figment.merge(("databases.streaks.url", url)),
            None => figment,
        }
    }
}

impl From<Env> for Config {
    fn from(env: Env) -> Self {
        let allowed_origins = match env.allowed_origins {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Self {
            storage: env.storage,
            database_url: env.database_url,
            port: env.port.unwrap_or(DEFAULT_PORT),
            allowed_origins,
        }
    }
}

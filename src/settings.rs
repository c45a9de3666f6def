use std::path::Path;

use anyhow::Context;
use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "trivia.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string, e.g. `sqlite:trivia.db`. Kept secret since it may carry credentials.
    pub url: SecretString,
    pub max_connections: u32,
    pub run_migrations: bool,
}

fn environment() -> Environment {
    Environment::with_prefix("TRIVIA")
        .prefix_separator("_")
        .separator("__")
}

impl Settings {
    /// Defaults, then the TOML file (if it exists), then `TRIVIA_*` environment variables.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_sources(path, environment())
    }

    fn from_sources(path: &Path, environment: Environment) -> anyhow::Result<Self> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite:trivia.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.run_migrations", true)?
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Settings have invalid shape")
    }
}

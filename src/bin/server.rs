use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::settings::{Settings, DEFAULT_CONFIG_FILE};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Settings file, overridden by TRIVIA_* environment variables
    #[clap(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let pool = establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;

    if settings.database.run_migrations {
        tracing::info!("Running db migrations...");
        run_migrations(&pool).await.context("Migrations failed")?;
    }

    run_server(&settings.server, pool).await
}

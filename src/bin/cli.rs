use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::archive::{export_data, import_data};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::settings::{Settings, DEFAULT_CONFIG_FILE};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Settings file, overridden by TRIVIA_* environment variables
    #[clap(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply schema migrations
    Migrate,
    /// Load categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Write categories.csv and questions.csv to a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;
    let pool = establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;

    match cli.command {
        Commands::Migrate => run_migrations(&pool).await.context("Migrations failed")?,
        Commands::Import { path } => {
            run_migrations(&pool).await.context("Migrations failed")?;
            import_data(&pool, &path).await.context("Cannot import")?
        }
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export")?,
    }

    pool.close().await;
    Ok(())
}

mod db;
mod insights;
mod scan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rivalwatch-cli")]
#[command(about = "Competitor monitoring command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Run one monitoring cycle over every active target and wait for it
    Scan,
    /// Run the monitoring pipeline once for a single target
    Check {
        /// Scrape target id
        target_id: i64,
    },
    /// List recently recorded insights
    Insights {
        /// Only show insights for this competitor (exact name)
        #[arg(long)]
        competitor: Option<String>,
        /// Maximum number of insights to show
        #[arg(long, default_value = "20", value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Upsert competitors and targets from the competitors file
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("rivalwatch-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let config = rivalwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = rivalwatch_db::PoolConfig::from_app_config(&config);
    let pool = rivalwatch_db::connect_pool(&config.database_url, pool_config).await?;

    let result = match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_db_ping(&pool).await,
            DbCommands::Migrate => db::run_db_migrate(&pool).await,
            DbCommands::Seed => db::run_db_seed(&pool, &config).await,
        },
        Commands::Scan => scan::run_scan(&pool, &config).await,
        Commands::Check { target_id } => scan::run_check(&pool, &config, target_id).await,
        Commands::Insights { competitor, limit } => {
            insights::run_insights(&pool, competitor.as_deref(), limit).await
        }
    };

    pool.close().await;
    result
}

#[cfg(test)]
mod tests;

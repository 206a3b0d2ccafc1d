mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use rivalwatch_classifier::ModelHandle;
use rivalwatch_monitor::{Monitor, MonitorStore, PgStore, Scheduler};
use rivalwatch_scraper::PageFetcher;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(rivalwatch_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, "rivalwatch-server starting");

    let pool_config = rivalwatch_db::PoolConfig::from_app_config(&config);
    let pool = rivalwatch_db::connect_pool(&config.database_url, pool_config).await?;
    rivalwatch_db::run_migrations(&pool).await?;

    let model = ModelHandle::load(&config.model_path);
    let fetcher = PageFetcher::from_config(&config)?;
    let store: Arc<dyn MonitorStore> = Arc::new(PgStore::new(pool.clone()));
    let monitor = Arc::new(Monitor::new(
        store,
        fetcher,
        model,
        config.max_concurrent_fetches,
    ));
    let cycles = Scheduler::new(monitor);

    // The repeated job first fires one interval after start.
    if let Err(e) = cycles.run().await {
        tracing::error!(error = %e, "scheduler: initial monitoring cycle failed");
    }

    let mut job_scheduler = scheduler::build_scheduler(
        cycles,
        Duration::from_secs(config.scan_interval_secs),
    )
    .await?;

    shutdown_signal().await;

    job_scheduler.shutdown().await?;
    pool.close().await;
    tracing::info!("rivalwatch-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

//! Monitoring command handlers: a full one-shot cycle, or a single target.

use std::sync::Arc;

use rivalwatch_classifier::ModelHandle;
use rivalwatch_monitor::{JobOutcome, Monitor, MonitorStore, PgStore, Scheduler};
use rivalwatch_scraper::PageFetcher;

/// Wire a [`Monitor`] from config, loading the classifier model.
fn build_monitor(
    pool: &sqlx::PgPool,
    config: &rivalwatch_core::AppConfig,
) -> anyhow::Result<Arc<Monitor>> {
    let model = ModelHandle::load(&config.model_path);
    if !model.is_ready() {
        anyhow::bail!(
            "classifier model at {} could not be loaded; see log for details",
            config.model_path.display()
        );
    }

    let fetcher = PageFetcher::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build page fetcher: {e}"))?;
    let store: Arc<dyn MonitorStore> = Arc::new(PgStore::new(pool.clone()));

    Ok(Arc::new(Monitor::new(
        store,
        fetcher,
        model,
        config.max_concurrent_fetches,
    )))
}

/// Run one monitoring cycle over every active target and wait for all jobs.
///
/// Per-target failures are logged and counted, not propagated.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or active targets cannot be
/// listed.
pub(crate) async fn run_scan(
    pool: &sqlx::PgPool,
    config: &rivalwatch_core::AppConfig,
) -> anyhow::Result<()> {
    let monitor = build_monitor(pool, config)?;
    let summary = Scheduler::new(monitor).run_to_completion().await?;

    if summary.submitted == 0 {
        println!("no active targets; run `db seed` first");
        return Ok(());
    }

    println!(
        "scanned {} target(s): {} changed, {} unchanged, {} skipped, {} failed",
        summary.submitted, summary.changed, summary.unchanged, summary.skipped, summary.failed
    );
    Ok(())
}

/// Run the pipeline once for `target_id` and print how it ended.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded or the job fails.
pub(crate) async fn run_check(
    pool: &sqlx::PgPool,
    config: &rivalwatch_core::AppConfig,
    target_id: i64,
) -> anyhow::Result<()> {
    let monitor = build_monitor(pool, config)?;
    let report = monitor.run_job(target_id).await;

    match report.result? {
        JobOutcome::Unchanged => println!("target {target_id}: no change"),
        JobOutcome::Changed {
            insight_id,
            category,
        } => println!("target {target_id}: changed; recorded insight {insight_id} ({category})"),
        JobOutcome::AlreadyRunning => println!("target {target_id}: already being checked"),
    }
    Ok(())
}

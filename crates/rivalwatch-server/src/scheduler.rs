//! Background job scheduler.
//!
//! Registers the recurring monitoring cycle on a [`JobScheduler`] at startup.

use std::time::Duration;

use rivalwatch_monitor::Scheduler;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it stops all scheduled jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    cycles: Scheduler,
    interval: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_monitoring_job(&scheduler, cycles, interval).await?;

    scheduler.start().await?;
    Ok(scheduler)
}

/// Register the repeated monitoring cycle.
///
/// Each tick only submits jobs; it does not wait for them, so a slow cycle
/// can overlap the next one. Per-target single-flight keeps overlapping jobs
/// for one target from racing.
async fn register_monitoring_job(
    scheduler: &JobScheduler,
    cycles: Scheduler,
    interval: Duration,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let cycles = cycles.clone();

        Box::pin(async move {
            tracing::info!("scheduler: starting monitoring cycle");
            if let Err(e) = cycles.run().await {
                tracing::error!(error = %e, "scheduler: failed to list active targets");
            }
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(
        interval_secs = interval.as_secs(),
        "scheduler: monitoring cycle registered"
    );
    Ok(())
}

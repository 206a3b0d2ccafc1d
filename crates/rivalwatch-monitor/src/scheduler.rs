//! Fans one pipeline job out per active target.

use std::sync::Arc;

use futures::future::join_all;
use rivalwatch_db::DbError;
use tokio::task::JoinHandle;

use crate::error::JobError;
use crate::pipeline::{JobOutcome, JobReport, Monitor};

/// Submits a job for every active target. Jobs run as independent tokio tasks;
/// one failing never affects the others or later cycles.
#[derive(Clone)]
pub struct Scheduler {
    monitor: Arc<Monitor>,
}

/// Tally of a cycle that was waited on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub submitted: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CycleSummary {
    #[must_use]
    pub fn from_reports<'a>(reports: impl IntoIterator<Item = &'a JobReport>) -> Self {
        let mut summary = Self::default();
        for report in reports {
            summary.record(&report.result);
        }
        summary
    }

    fn record(&mut self, result: &Result<JobOutcome, JobError>) {
        self.submitted += 1;
        match result {
            Ok(JobOutcome::Changed { .. }) => self.changed += 1,
            Ok(JobOutcome::Unchanged) => self.unchanged += 1,
            Ok(JobOutcome::AlreadyRunning) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}

impl Scheduler {
    #[must_use]
    pub fn new(monitor: Arc<Monitor>) -> Self {
        Self { monitor }
    }

    /// Spawn one job per active target and return their handles.
    ///
    /// # Errors
    ///
    /// Returns the store error if active targets cannot be listed; no jobs
    /// are spawned in that case.
    pub async fn spawn_cycle(&self) -> Result<Vec<JoinHandle<JobReport>>, DbError> {
        let targets = self.monitor.store().list_active_targets().await?;

        let handles = targets
            .into_iter()
            .map(|target| {
                let monitor = Arc::clone(&self.monitor);
                tokio::spawn(async move { monitor.run_job(target.id).await })
            })
            .collect();

        Ok(handles)
    }

    /// Submit a cycle and return immediately with the number of jobs spawned.
    ///
    /// # Errors
    ///
    /// See [`Scheduler::spawn_cycle`].
    pub async fn run(&self) -> Result<usize, DbError> {
        let submitted = self.spawn_cycle().await?.len();
        tracing::info!(submitted, "scheduler: monitoring cycle submitted");
        Ok(submitted)
    }

    /// Submit a cycle and wait for every job to finish.
    ///
    /// # Errors
    ///
    /// See [`Scheduler::spawn_cycle`].
    pub async fn run_to_completion(&self) -> Result<CycleSummary, DbError> {
        let handles = self.spawn_cycle().await?;
        let mut reports = Vec::with_capacity(handles.len());
        let mut lost = 0;

        for joined in join_all(handles).await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::error!(error = %e, "scheduler: job task did not complete");
                    lost += 1;
                }
            }
        }

        let mut summary = CycleSummary::from_reports(&reports);
        summary.submitted += lost;
        summary.failed += lost;

        tracing::info!(
            submitted = summary.submitted,
            changed = summary.changed,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            failed = summary.failed,
            "scheduler: monitoring cycle complete"
        );
        Ok(summary)
    }
}

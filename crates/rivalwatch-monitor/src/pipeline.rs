//! The per-target monitoring job.
//!
//! ```text
//! model ready? -> claim target id -> load target -> fetch -> extract
//!   -> fingerprint == last? (Unchanged)
//!   -> classify -> record insight + fingerprint (Changed)
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use rivalwatch_classifier::{Classifier, ModelHandle};
use rivalwatch_core::{Category, FingerprintUpdate, NewInsight};
use rivalwatch_db::DbError;
use rivalwatch_scraper::{extract_page, fingerprint, PageFetcher, ScraperError};
use tokio::sync::Semaphore;

use crate::error::JobError;
use crate::in_flight::InFlight;
use crate::store::MonitorStore;

/// Characters of body text kept in an insight summary.
pub const SUMMARY_CHARS: usize = 1000;

/// How a job that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Page text matches the stored fingerprint; nothing written.
    Unchanged,
    /// A new insight was recorded and the fingerprint moved.
    Changed { insight_id: i64, category: Category },
    /// Another job for the same target was already running in this process.
    AlreadyRunning,
}

/// What [`Monitor::run_job`] hands back once a job has been logged.
#[derive(Debug)]
pub struct JobReport {
    pub target_id: i64,
    pub result: Result<JobOutcome, JobError>,
}

/// Runs pipeline jobs against a shared store, fetcher, and classifier.
pub struct Monitor {
    store: Arc<dyn MonitorStore>,
    fetcher: PageFetcher,
    model: ModelHandle,
    fetch_permits: Semaphore,
    in_flight: InFlight,
}

impl Monitor {
    /// `max_concurrent_fetches` caps outbound requests across all jobs; it is
    /// clamped to at least one.
    #[must_use]
    pub fn new(
        store: Arc<dyn MonitorStore>,
        fetcher: PageFetcher,
        model: ModelHandle,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            store,
            fetcher,
            model,
            fetch_permits: Semaphore::new(max_concurrent_fetches.max(1)),
            in_flight: InFlight::new(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn MonitorStore> {
        &self.store
    }

    /// Run the pipeline once for `target_id`.
    ///
    /// # Errors
    ///
    /// - [`JobError::ModelUnavailable`] before any I/O if the classifier is not loaded.
    /// - [`JobError::TargetUnavailable`] if the target is missing or inactive.
    /// - [`JobError::Fetch`] on network failure, timeout, or non-2xx status.
    /// - [`JobError::EmptyContent`] if the page has no visible text.
    /// - [`JobError::Persist`] if the insight commit is rolled back.
    /// - [`JobError::Unexpected`] if the target cannot be read.
    pub async fn run_target(&self, target_id: i64) -> Result<JobOutcome, JobError> {
        let classifier = match &self.model {
            ModelHandle::Ready(classifier) => classifier,
            ModelHandle::Unavailable(reason) => {
                return Err(JobError::ModelUnavailable(reason.to_string()))
            }
        };

        let Some(_claim) = self.in_flight.try_acquire(target_id) else {
            return Ok(JobOutcome::AlreadyRunning);
        };

        let target = self
            .store
            .get_target(target_id)
            .await
            .map_err(|e| JobError::Unexpected(format!("failed to load target {target_id}: {e}")))?
            .filter(|target| target.is_active)
            .ok_or(JobError::TargetUnavailable { target_id })?;

        let page = {
            let _permit = self
                .fetch_permits
                .acquire()
                .await
                .map_err(|_| JobError::Unexpected("fetch limiter closed".to_string()))?;
            self.fetcher.fetch(&target.url).await?
        };

        let extracted = extract_page(&page, &target.competitor_name).map_err(|e| match e {
            ScraperError::EmptyContent { url } => JobError::EmptyContent { url },
            other => JobError::Fetch(other),
        })?;

        let current = fingerprint(&extracted.body_text);
        if target.last_fingerprint.as_deref() == Some(current.as_str()) {
            return Ok(JobOutcome::Unchanged);
        }

        let category = classifier.predict(&extracted.body_text);

        let insight = NewInsight {
            competitor_id: target.competitor_id,
            target_id: target.id,
            title: extracted.title.trim().to_string(),
            summary: summarize(&extracted.body_text),
            category,
            source_url: target.url.clone(),
            event_date: Utc::now(),
        };
        let update = FingerprintUpdate {
            target_id: target.id,
            previous: target.last_fingerprint.clone(),
            current,
        };

        let row = self
            .store
            .record_insight(&insight, &update)
            .await
            .map_err(JobError::Persist)?;

        Ok(JobOutcome::Changed {
            insight_id: row.id,
            category,
        })
    }

    /// Run one job to completion and log how it ended. Never panics or
    /// propagates; the result is returned for callers that want to tally it.
    pub async fn run_job(&self, target_id: i64) -> JobReport {
        let result = match AssertUnwindSafe(self.run_target(target_id))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(JobError::Unexpected(format!(
                "job panicked: {}",
                panic_message(&*panic)
            ))),
        };

        log_result(target_id, &result);
        JobReport { target_id, result }
    }
}

/// First [`SUMMARY_CHARS`] characters of `body_text`, always followed by `...`.
#[must_use]
pub fn summarize(body_text: &str) -> String {
    let mut summary: String = body_text.chars().take(SUMMARY_CHARS).collect();
    summary.push_str("...");
    summary
}

fn log_result(target_id: i64, result: &Result<JobOutcome, JobError>) {
    match result {
        Ok(JobOutcome::Changed {
            insight_id,
            category,
        }) => tracing::info!(
            target_id,
            insight_id,
            category = %category,
            "pipeline: change detected, insight recorded"
        ),
        Ok(JobOutcome::Unchanged) => tracing::debug!(target_id, "pipeline: no change"),
        Ok(JobOutcome::AlreadyRunning) => {
            tracing::debug!(target_id, "pipeline: job already running for target; skipped");
        }
        Err(JobError::Persist(DbError::FingerprintConflict { .. })) => tracing::warn!(
            target_id,
            "pipeline: fingerprint changed concurrently; insight discarded"
        ),
        Err(e @ (JobError::ModelUnavailable(_) | JobError::Persist(_) | JobError::Unexpected(_))) => {
            tracing::error!(target_id, error = %e, "pipeline: job failed");
        }
        Err(e) => tracing::warn!(target_id, error = %e, "pipeline: job failed"),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

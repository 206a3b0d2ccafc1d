use rivalwatch_db::DbError;
use rivalwatch_scraper::ScraperError;
use thiserror::Error;

/// Why a pipeline job stopped before recording an outcome.
#[derive(Debug, Error)]
pub enum JobError {
    /// The classifier failed to load at startup; no work is attempted.
    #[error("classifier unavailable: {0}")]
    ModelUnavailable(String),

    /// The target does not exist or has been deactivated.
    #[error("target {target_id} is missing or inactive")]
    TargetUnavailable { target_id: i64 },

    #[error("fetch failed: {0}")]
    Fetch(#[from] ScraperError),

    #[error("page at {url} has no visible text")]
    EmptyContent { url: String },

    /// The insight and fingerprint commit was rolled back.
    #[error("failed to persist insight: {0}")]
    Persist(#[source] DbError),

    #[error("unexpected job failure: {0}")]
    Unexpected(String),
}

//! Persistence seam used by the pipeline.

use async_trait::async_trait;
use rivalwatch_core::{FingerprintUpdate, NewInsight};
use rivalwatch_db::{DbError, InsightRow, TargetRow};
use sqlx::PgPool;

/// Target reads and the atomic insight + fingerprint write.
///
/// Implemented by [`PgStore`] in production and by in-memory stores in tests.
#[async_trait]
pub trait MonitorStore: Send + Sync {
    async fn list_active_targets(&self) -> Result<Vec<TargetRow>, DbError>;

    /// The target with `target_id`, active or not.
    async fn get_target(&self, target_id: i64) -> Result<Option<TargetRow>, DbError>;

    /// Append `insight` and apply `update` in one transaction.
    ///
    /// Fails with [`DbError::FingerprintConflict`] if the stored fingerprint
    /// is no longer `update.previous`; nothing is written in that case.
    async fn record_insight(
        &self,
        insight: &NewInsight,
        update: &FingerprintUpdate,
    ) -> Result<InsightRow, DbError>;
}

/// [`MonitorStore`] backed by the Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MonitorStore for PgStore {
    async fn list_active_targets(&self) -> Result<Vec<TargetRow>, DbError> {
        rivalwatch_db::list_active_targets(&self.pool).await
    }

    async fn get_target(&self, target_id: i64) -> Result<Option<TargetRow>, DbError> {
        rivalwatch_db::get_target(&self.pool, target_id).await
    }

    async fn record_insight(
        &self,
        insight: &NewInsight,
        update: &FingerprintUpdate,
    ) -> Result<InsightRow, DbError> {
        rivalwatch_db::record_insight(&self.pool, insight, update).await
    }
}

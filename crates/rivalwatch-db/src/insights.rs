//! Database operations for the append-only `insights` table.
//!
//! Insights are never updated or deleted through this crate. New rows are
//! written only by [`record_insight`], together with the owning target's
//! fingerprint.

use chrono::{DateTime, Utc};
use rivalwatch_core::{Category, FingerprintUpdate, NewInsight};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `insights` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InsightRow {
    pub id: i64,
    pub public_id: Uuid,
    pub competitor_id: i64,
    /// `NULL` once the originating target has been removed.
    pub target_id: Option<i64>,
    pub title: String,
    pub summary: Option<String>,
    pub category: String,
    pub source_url: String,
    pub event_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InsightRow {
    #[must_use]
    pub fn category(&self) -> Category {
        Category::from_label(&self.category)
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Append an insight and move the target's fingerprint, as one transaction.
///
/// The fingerprint update is a compare-and-set: it only applies while the
/// target still carries `update.previous`. If another writer got there first
/// the transaction is rolled back and nothing is persisted.
///
/// # Errors
///
/// - [`DbError::InvalidValue`] if `insight` and `update` name different targets.
/// - [`DbError::FingerprintConflict`] if the stored fingerprint no longer
///   matches `update.previous` (or the target row is gone).
/// - [`DbError::Sqlx`] if any statement or the commit fails.
pub async fn record_insight(
    pool: &PgPool,
    insight: &NewInsight,
    update: &FingerprintUpdate,
) -> Result<InsightRow, DbError> {
    if insight.target_id != update.target_id {
        return Err(DbError::InvalidValue(format!(
            "insight targets {} but fingerprint update targets {}",
            insight.target_id, update.target_id
        )));
    }

    let mut tx = pool.begin().await?;

    let moved = sqlx::query(
        "UPDATE scrape_targets \
         SET last_fingerprint = $1, updated_at = NOW() \
         WHERE id = $2 AND last_fingerprint IS NOT DISTINCT FROM $3",
    )
    .bind(&update.current)
    .bind(update.target_id)
    .bind(update.previous.as_deref())
    .execute(&mut *tx)
    .await?;

    if moved.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(DbError::FingerprintConflict {
            target_id: update.target_id,
        });
    }

    let row = sqlx::query_as::<_, InsightRow>(
        "INSERT INTO insights \
             (public_id, competitor_id, target_id, title, summary, category, source_url, event_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, public_id, competitor_id, target_id, title, summary, category, \
                   source_url, event_date, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(insight.competitor_id)
    .bind(insight.target_id)
    .bind(&insight.title)
    .bind(&insight.summary)
    .bind(insight.category.as_str())
    .bind(&insight.source_url)
    .bind(insight.event_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(row)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// List recent insights, optionally filtered by competitor.
///
/// Results are ordered by `event_date DESC` then `id DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_insights(
    pool: &PgPool,
    competitor_id: Option<i64>,
    limit: i64,
) -> Result<Vec<InsightRow>, DbError> {
    let rows = match competitor_id {
        Some(id) => {
            sqlx::query_as::<_, InsightRow>(
                "SELECT id, public_id, competitor_id, target_id, title, summary, category, \
                        source_url, event_date, created_at \
                 FROM insights \
                 WHERE competitor_id = $1 \
                 ORDER BY event_date DESC, id DESC \
                 LIMIT $2",
            )
            .bind(id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, InsightRow>(
                "SELECT id, public_id, competitor_id, target_id, title, summary, category, \
                        source_url, event_date, created_at \
                 FROM insights \
                 ORDER BY event_date DESC, id DESC \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

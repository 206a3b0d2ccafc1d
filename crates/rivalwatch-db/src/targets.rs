//! Read access to the `scrape_targets` table.
//!
//! `last_fingerprint` is never written from here; the only writer is
//! [`crate::insights::record_insight`], which updates it in the same
//! transaction that appends the insight.

use chrono::{DateTime, Utc};
use rivalwatch_core::TargetType;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from `scrape_targets`, joined with its competitor's display name.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TargetRow {
    pub id: i64,
    pub competitor_id: i64,
    pub competitor_name: String,
    pub url: String,
    pub target_type: String,
    pub last_fingerprint: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TargetRow {
    /// The stored target type. The column is constrained to the closed set,
    /// so an unparseable value can only come from a manual edit; it reads as `OTHER`.
    #[must_use]
    pub fn kind(&self) -> TargetType {
        self.target_type.parse().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every target with `is_active = true`, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_targets(pool: &PgPool) -> Result<Vec<TargetRow>, DbError> {
    let rows = sqlx::query_as::<_, TargetRow>(
        "SELECT t.id, t.competitor_id, c.name AS competitor_name, t.url, t.target_type, \
                t.last_fingerprint, t.is_active, t.created_at, t.updated_at \
         FROM scrape_targets t \
         JOIN competitors c ON c.id = t.competitor_id \
         WHERE t.is_active = true \
         ORDER BY t.id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns a single target by id regardless of its activity flag, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_target(pool: &PgPool, id: i64) -> Result<Option<TargetRow>, DbError> {
    let row = sqlx::query_as::<_, TargetRow>(
        "SELECT t.id, t.competitor_id, c.name AS competitor_name, t.url, t.target_type, \
                t.last_fingerprint, t.is_active, t.created_at, t.updated_at \
         FROM scrape_targets t \
         JOIN competitors c ON c.id = t.competitor_id \
         WHERE t.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(target_type: &str) -> TargetRow {
        TargetRow {
            id: 1,
            competitor_id: 1,
            competitor_name: "Acme".to_string(),
            url: "https://acme.example/blog".to_string(),
            target_type: target_type.to_string(),
            last_fingerprint: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn kind_parses_stored_label() {
        assert_eq!(row("PRICING").kind(), TargetType::Pricing);
    }

    #[test]
    fn kind_falls_back_to_other() {
        assert_eq!(row("PODCAST").kind(), TargetType::Other);
    }
}

//! Competitor lookups and YAML seeding.

use chrono::{DateTime, Utc};
use rivalwatch_core::CompetitorConfig;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `competitors` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CompetitorRow {
    pub id: i64,
    pub name: String,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counts of rows touched by [`seed_competitors`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub competitors: usize,
    pub targets: usize,
}

/// Returns a competitor by exact name, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_competitor_by_name(
    pool: &PgPool,
    name: &str,
) -> Result<Option<CompetitorRow>, DbError> {
    let row = sqlx::query_as::<_, CompetitorRow>(
        "SELECT id, name, website_url, created_at, updated_at \
         FROM competitors \
         WHERE name = $1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Upsert competitors and their targets from config.
///
/// Competitors conflict on `name`; targets conflict on `(competitor_id, url)`
/// and only have `target_type` and `is_active` refreshed, so an existing
/// `last_fingerprint` survives re-seeding. All upserts run inside a single
/// transaction; if any operation fails the entire batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_competitors(
    pool: &PgPool,
    competitors: &[CompetitorConfig],
) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for competitor in competitors {
        let competitor_id: i64 = sqlx::query_scalar(
            "INSERT INTO competitors (name, website_url) \
             VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET \
                 website_url = EXCLUDED.website_url, \
                 updated_at = NOW() \
             RETURNING id",
        )
        .bind(competitor.name.trim())
        .bind(&competitor.website_url)
        .fetch_one(&mut *tx)
        .await?;

        for target in &competitor.targets {
            sqlx::query(
                "INSERT INTO scrape_targets (competitor_id, url, target_type, is_active) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (competitor_id, url) DO UPDATE SET \
                     target_type = EXCLUDED.target_type, \
                     is_active = EXCLUDED.is_active, \
                     updated_at = NOW()",
            )
            .bind(competitor_id)
            .bind(target.url.trim())
            .bind(target.target_type.as_str())
            .bind(target.active)
            .execute(&mut *tx)
            .await?;
            summary.targets += 1;
        }

        summary.competitors += 1;
    }

    tx.commit().await?;
    Ok(summary)
}

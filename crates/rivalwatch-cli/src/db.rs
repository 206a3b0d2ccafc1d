//! `db` sub-command handlers.

/// Verify the database answers a trivial query.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_db_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    rivalwatch_db::ping(pool).await?;
    println!("database ok");
    Ok(())
}

/// Apply any pending migrations and report how many ran.
///
/// # Errors
///
/// Returns an error if a migration fails.
pub(crate) async fn run_db_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = rivalwatch_db::run_migrations(pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Load the competitors file and upsert its contents.
///
/// Existing targets keep their stored fingerprint, so re-seeding never
/// triggers spurious change detections.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or if the database
/// transaction fails (in which case nothing is written).
pub(crate) async fn run_db_seed(
    pool: &sqlx::PgPool,
    config: &rivalwatch_core::AppConfig,
) -> anyhow::Result<()> {
    let file = rivalwatch_core::load_competitors(&config.competitors_path)?;
    let summary = rivalwatch_db::seed_competitors(pool, &file.competitors).await?;

    tracing::info!(
        competitors = summary.competitors,
        targets = summary.targets,
        path = %config.competitors_path.display(),
        "seeded competitors"
    );
    println!(
        "seeded {} competitor(s), {} target(s)",
        summary.competitors, summary.targets
    );
    Ok(())
}

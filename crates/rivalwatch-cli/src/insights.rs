/// Print the most recent insights, newest first.
///
/// # Errors
///
/// Returns an error if `competitor` names no known competitor or the query
/// fails.
pub(crate) async fn run_insights(
    pool: &sqlx::PgPool,
    competitor: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    let competitor_id = match competitor {
        Some(name) => Some(
            rivalwatch_db::get_competitor_by_name(pool, name)
                .await?
                .ok_or_else(|| anyhow::anyhow!("competitor '{name}' not found"))?
                .id,
        ),
        None => None,
    };

    let insights = rivalwatch_db::list_recent_insights(pool, competitor_id, limit).await?;

    if insights.is_empty() {
        println!("no insights recorded yet; run `scan` first");
        return Ok(());
    }

    println!("{:<12}{:<10}{:<50}SOURCE", "DATE", "CATEGORY", "TITLE");
    for insight in &insights {
        println!(
            "{:<12}{:<10}{:<50}{}",
            insight.event_date.format("%Y-%m-%d").to_string(),
            insight.category,
            truncate(&insight.title, 47),
            insight.source_url
        );
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}

use crate::core::indexing::populate_index;
use crate::core::runner::summarize;
use crate::core::{ConfigProvider, SearchIndex, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use crate::{CsvScoreStore, ElasticsearchClient, LocalStorage, ScenarioRunner, ScoreGenerator};
use std::time::Duration;

/// One full run: scenarios, summary, then the optional search steps.
/// Returns the scores found for the queried department, if a query was given.
pub async fn execute<C>(config: &C) -> Result<Option<Vec<i64>>>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let storage = LocalStorage::new(config.output_dir().to_string());
    let mut runner = ScenarioRunner::new(
        CsvScoreStore::new(storage.clone()),
        ScoreGenerator::new(config.seed()),
    )
    .with_refresh(config.refresh());

    let outcomes = runner.run_all().await?;
    for outcome in &outcomes {
        let source = if outcome.cached { "cached" } else { "computed" };
        println!(
            "{:<20} {:>10.2}  ({}, {} departments)",
            outcome.name,
            outcome.aggregate,
            source,
            outcome.company.departments().len()
        );
    }

    let summary = summarize(&outcomes);
    storage
        .write_file("summary.json", &serde_json::to_vec_pretty(&summary)?)
        .await?;
    tracing::info!("📁 Summary saved to: {}", storage.full_path("summary.json").display());

    if !config.search_enabled() {
        return Ok(None);
    }

    let client = ElasticsearchClient::connect(
        config.search_endpoint(),
        Duration::from_secs(config.timeout_seconds()),
    )?;

    // 只有 --index 才寫入索引，查詢不應重複寫入
    if config.index_enabled() {
        let indexed = populate_index(
            runner.store(),
            &client,
            config.source_csv(),
            config.index_name(),
        )
        .await?;
        if indexed > 0 {
            println!("Indexed {} departments into {}", indexed, config.index_name());
        }
    }

    let mut found = None;
    if let Some(department) = config.query() {
        let scores = client
            .query_by_department(config.index_name(), department)
            .await?;
        println!("{}: {:?}", department, scores);
        found = Some(scores);
    }

    client.close();
    Ok(found)
}

use super::exit_codes;
use crate::cli::args::IngestArgs;
use tally_core::config::IngestConfig;
use tally_core::jobs::ingest::write_records;
use tally_core::{DynamoTable, TallyError};
use tally_metrics::{format_result_file, IgnoreList, MetricMatch, ScoreExtractor};

pub const USAGE: &str = "Usage: tally ingest <RESULT_PATH>";

pub async fn cmd_ingest(args: IngestArgs) -> anyhow::Result<i32> {
    let Some(result_path) = args.result_path else {
        eprintln!("{USAGE}");
        return Ok(exit_codes::FAILURE);
    };

    let matching = MetricMatch::from(args.match_mode);
    let extractor = ScoreExtractor::new(matching, IgnoreList::default());

    let records = format_result_file(&result_path, &extractor)?;
    tracing::info!(
        event = "tally.ingest.formatted",
        path = %result_path.display(),
        records = records.len(),
        matching = %matching
    );

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(exit_codes::OK);
    }

    let cfg = IngestConfig::from_env().map_err(TallyError::from)?;
    let table = DynamoTable::connect(&cfg.client, &cfg.table_name).await;
    let written = write_records(&table, &records).await?;

    eprintln!("wrote {} record(s) to {}", written, cfg.table_name);
    Ok(exit_codes::OK)
}

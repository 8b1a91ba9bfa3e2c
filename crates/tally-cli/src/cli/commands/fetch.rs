use super::exit_codes;
use tally_core::config::FetchConfig;
use tally_core::jobs::latest::{fetch_latest_per_model, write_latest};
use tally_core::{DynamoTable, TallyError};

pub async fn cmd_fetch_latest() -> anyhow::Result<i32> {
    let cfg = FetchConfig::from_env().map_err(TallyError::from)?;
    let table = DynamoTable::connect(&cfg.client, &cfg.table_name).await;

    let latest = fetch_latest_per_model(&table).await?;
    write_latest(&cfg.result_file_path, &latest)?;

    eprintln!(
        "wrote latest results for {} model(s) to {}",
        latest.len(),
        cfg.result_file_path.display()
    );
    Ok(exit_codes::OK)
}

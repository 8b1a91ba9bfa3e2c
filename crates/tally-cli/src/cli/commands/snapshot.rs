use super::exit_codes;
use crate::cli::args::SnapshotArgs;
use tally_core::config::SnapshotConfig;
use tally_core::jobs::snapshot::{top_rated, write_snapshot};
use tally_core::DynamoTable;

pub async fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<i32> {
    let cfg = SnapshotConfig::from_env();
    let table = DynamoTable::connect(&cfg.client, &cfg.table_name).await;

    let items = top_rated(&table, args.limit).await?;
    write_snapshot(&args.out, &items)?;

    eprintln!("✅ {} updated successfully", args.out.display());
    Ok(exit_codes::OK)
}

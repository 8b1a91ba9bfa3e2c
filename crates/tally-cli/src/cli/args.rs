use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tally_core::jobs::snapshot::{DEFAULT_SNAPSHOT_PATH, DEFAULT_TOP_N};
use tally_metrics::MetricMatch;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Move evaluation results into and out of a DynamoDB table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the top-rated items of $DYNAMODB_TABLE to a JSON snapshot
    Snapshot(SnapshotArgs),
    /// Write the latest record of every model in $DYNAMODB_TABLE_NAME to $RESULT_FILE_PATH
    FetchLatest,
    /// Parse a result file and batch-write its records to $DYNAMODB_TABLE_NAME
    Ingest(IngestArgs),
    /// Print the version
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Number of items to keep
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub limit: usize,

    #[arg(long, default_value = DEFAULT_SNAPSHOT_PATH)]
    pub out: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct IngestArgs {
    /// Result JSON file produced by a test run
    pub result_path: Option<PathBuf>,

    /// How evaluation_summary keys select the metric block
    #[arg(long = "match", value_enum, default_value_t = MatchMode::Contains)]
    pub match_mode: MatchMode,

    /// Print the records instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Key is a substring of the metric name
    #[default]
    Contains,
    /// Key equals the metric name
    Exact,
}

impl From<MatchMode> for MetricMatch {
    fn from(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Contains => MetricMatch::Contains,
            MatchMode::Exact => MetricMatch::Exact,
        }
    }
}

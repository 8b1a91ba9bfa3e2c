use super::args::*;
use tally_core::{ConfigError, TallyError};

pub mod fetch;
pub mod ingest;
pub mod snapshot;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Snapshot(args) => snapshot::cmd_snapshot(args).await,
        Command::FetchLatest => fetch::cmd_fetch_latest().await,
        Command::Ingest(args) => ingest::cmd_ingest(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Configuration problems exit with 2, every other failure with 1.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    let is_config = err.chain().any(|cause| {
        cause.downcast_ref::<ConfigError>().is_some()
            || cause
                .downcast_ref::<TallyError>()
                .is_some_and(TallyError::is_config)
    });
    if is_config {
        exit_codes::CONFIG_ERROR
    } else {
        exit_codes::FAILURE
    }
}

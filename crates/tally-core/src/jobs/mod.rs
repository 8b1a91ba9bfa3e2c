pub mod ingest;
pub mod latest;
pub mod snapshot;

pub mod config;
pub mod errors;
pub mod jobs;
pub mod model;
pub mod output;
pub mod storage;

pub use errors::{ConfigError, TallyError, ValidationError};
pub use model::{RecordFields, RecordKeys, ResultRecord, Scores};
pub use storage::{DynamoTable, IndexQuery, Item, MemoryTable, TableStore};

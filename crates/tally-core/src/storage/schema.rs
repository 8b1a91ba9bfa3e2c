//! Table schema constants
//!
//! ```text
//! Primary Key:
//!   - PK (String, Partition Key): "RUN#<run_id>"
//!   - SK (String, Sort Key):      "<start_time>#<metric>"
//!
//! GSI1:
//!   - GSI1PK (String, Partition Key): "MODEL#<model>"
//!   - GSI1SK (String, Sort Key):      "<start_time>"
//!
//! Attributes:
//!   - run_id, test_id, start_time, end_time, metric, model, raw_data_file: String
//!   - duration: Number (seconds, exact decimal)
//!   - scores: Map (flattened score path -> value)
//! ```

pub const ATTR_PK: &str = "PK";
pub const ATTR_SK: &str = "SK";
pub const ATTR_GSI1PK: &str = "GSI1PK";
pub const ATTR_GSI1SK: &str = "GSI1SK";

/// Secondary index keyed by model, ordered by start time.
pub const INDEX_GSI1: &str = "GSI1";

pub const RUN_PREFIX: &str = "RUN#";
pub const MODEL_PREFIX: &str = "MODEL#";

/// Numeric attribute the top-N snapshot is ranked by.
pub const ATTR_RATING: &str = "rating";

/// BatchWriteItem accepts at most 25 put requests per call.
pub const MAX_BATCH_WRITE: usize = 25;

mod extract;
mod flatten;
mod matcher;

pub mod result_file;

pub use extract::{IgnoreList, ScoreExtractor, DEFAULT_IGNORE_KEYS};
pub use flatten::{flatten, KEY_SEPARATOR};
pub use matcher::MetricMatch;
pub use result_file::{format_result_file, ResultFile};

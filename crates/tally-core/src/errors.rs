use std::path::PathBuf;
use thiserror::Error;

/// Missing or unusable configuration. Raised before any table call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(pub String);

impl ConfigError {
    pub fn missing_env(name: &str) -> Self {
        ConfigError(format!("{name} environment variable is not set"))
    }
}

/// A `ResultRecord` field that violates its invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid record: field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("invalid record: field '{field}' must be a string")]
    NotAString { field: &'static str },

    #[error("invalid record: duration must be greater than 0 (got {value})")]
    NonPositiveDuration { value: String },

    #[error("invalid record: duration must be a decimal number (got {value})")]
    NotADecimal { value: String },
}

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("result file not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("result file {} contains invalid JSON: {source}", .path.display())]
    InputDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected error reading result file {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Error reported by the table service (or the client talking to it).
    #[error("table service error: {0}")]
    Table(String),

    /// A table item that lacks an attribute the job depends on.
    #[error("malformed item: {0}")]
    Item(String),

    #[error("failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TallyError {
    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table(msg.into())
    }

    pub fn item(msg: impl Into<String>) -> Self {
        Self::Item(msg.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, TallyError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;

use crate::errors::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "ap-southeast-1";
pub const DEFAULT_SNAPSHOT_TABLE: &str = "FoodReviews";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_SNAPSHOT_TABLE: &str = "DYNAMODB_TABLE";
pub const ENV_TABLE_NAME: &str = "DYNAMODB_TABLE_NAME";
pub const ENV_RESULT_FILE_PATH: &str = "RESULT_FILE_PATH";
pub const ENV_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";
pub const ENV_TIMEOUT_MS: &str = "DYNAMODB_TIMEOUT_MS";
pub const ENV_LOG: &str = "TALLY_LOG";

/// Connection settings shared by every job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub region: String,
    /// Endpoint override (e.g. LocalStack).
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = non_empty(lookup(ENV_REGION)) {
            cfg.region = v;
        }
        cfg.endpoint = non_empty(lookup(ENV_ENDPOINT_URL));
        if let Some(v) = lookup(ENV_TIMEOUT_MS) {
            if let Ok(n) = v.trim().parse() {
                cfg.timeout_ms = Some(n);
            }
        }
        cfg
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub client: ClientConfig,
    pub table_name: String,
}

impl SnapshotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: non_empty(lookup(ENV_SNAPSHOT_TABLE))
                .unwrap_or_else(|| DEFAULT_SNAPSHOT_TABLE.to_string()),
            client: ClientConfig::from_lookup(lookup),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub client: ClientConfig,
    pub table_name: String,
    pub result_file_path: PathBuf,
}

impl FetchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = required(&lookup, ENV_TABLE_NAME)?;
        let result_file_path = required(&lookup, ENV_RESULT_FILE_PATH)?;
        Ok(Self {
            client: ClientConfig::from_lookup(lookup),
            table_name,
            result_file_path: PathBuf::from(result_file_path),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    pub client: ClientConfig,
    pub table_name: String,
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let table_name = required(&lookup, ENV_TABLE_NAME)?;
        Ok(Self {
            client: ClientConfig::from_lookup(lookup),
            table_name,
        })
    }
}

/// Tracing filter directive, `TALLY_LOG` or `info`.
pub fn log_level_from_env() -> String {
    non_empty(env_lookup(ENV_LOG)).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, ConfigError> {
    non_empty(lookup(key)).ok_or_else(|| ConfigError::missing_env(key))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

//! Reading an evaluation result file and turning it into `ResultRecord`s.
//!
//! Expected shape:
//!
//! ```text
//! {
//!   "run_metadata": { "run_id", "test_id", "start_time", "end_time", "duration" },
//!   "run_results": [
//!     {
//!       "metadata": { "metric": { "name" }, "connector": { "model" } },
//!       "results":  { "evaluation_summary": { "<metric>": { ... } } }
//!     }
//!   ]
//! }
//! ```
//!
//! Numbers are kept as exact decimals. A missing (or wrongly typed)
//! `run_metadata` / `run_results` counts as empty.

use crate::extract::ScoreExtractor;
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tally_core::{RecordFields, ResultRecord, TallyError, ValidationError};

#[derive(Debug, Clone)]
pub struct ResultFile {
    path: PathBuf,
    run_metadata: Map<String, Value>,
    run_results: Vec<Value>,
}

impl ResultFile {
    /// Read and decode `path`. Missing file, undecodable content, and any
    /// other read failure are reported as distinct errors.
    pub fn load(path: &Path) -> Result<Self, TallyError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TallyError::InputNotFound {
                path: path.to_path_buf(),
            },
            _ => TallyError::InputRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(path, &text)
    }

    /// The top level must be a JSON object; anything else is a decode error.
    pub fn parse(path: &Path, text: &str) -> Result<Self, TallyError> {
        let mut top: Map<String, Value> =
            serde_json::from_str(text).map_err(|source| TallyError::InputDecode {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            run_metadata: match top.remove("run_metadata") {
                Some(Value::Object(m)) => m,
                _ => Map::new(),
            },
            run_results: match top.remove("run_results") {
                Some(Value::Array(v)) => v,
                _ => Vec::new(),
            },
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run_results(&self) -> &[Value] {
        &self.run_results
    }

    /// One record per `run_results` entry. Stops at the first entry whose
    /// record fails validation.
    pub fn records(&self, extractor: &ScoreExtractor) -> Result<Vec<ResultRecord>, ValidationError> {
        let raw_data_file = self.path.to_string_lossy().into_owned();
        let meta = &self.run_metadata;

        self.run_results
            .iter()
            .map(|entry| {
                let metric = string_field("metric", lookup(entry, &["metadata", "metric", "name"]))?;
                let model = string_field("model", lookup(entry, &["metadata", "connector", "model"]))?;

                let scores = match lookup(entry, &["results", "evaluation_summary"]) {
                    Some(Value::Object(summary)) => extractor.extract(summary, &metric),
                    _ => Default::default(),
                };

                tracing::debug!(
                    event = "tally.ingest.entry",
                    metric = %metric,
                    model = %model,
                    scores = scores.len()
                );

                ResultRecord::new(RecordFields {
                    run_id: string_field("run_id", meta.get("run_id"))?,
                    test_id: string_field("test_id", meta.get("test_id"))?,
                    start_time: string_field("start_time", meta.get("start_time"))?,
                    end_time: string_field("end_time", meta.get("end_time"))?,
                    duration: decimal_field(meta.get("duration"))?,
                    metric,
                    model,
                    scores,
                    raw_data_file: raw_data_file.clone(),
                })
            })
            .collect()
    }
}

/// Load `path` and build its records.
pub fn format_result_file(
    path: &Path,
    extractor: &ScoreExtractor,
) -> Result<Vec<ResultRecord>, TallyError> {
    let file = ResultFile::load(path)?;
    Ok(file.records(extractor)?)
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(key))
}

/// Absent or null reads as "", which the record invariants reject later.
fn string_field(field: &'static str, value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::NotAString { field }),
    }
}

fn decimal_field(value: Option<&Value>) -> Result<Option<Number>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(Value::String(s)) => Number::from_str(s.trim())
            .map(Some)
            .map_err(|_| ValidationError::NotADecimal { value: s.clone() }),
        Some(other) => Err(ValidationError::NotADecimal {
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: Value) -> ResultFile {
        ResultFile::parse(Path::new("run.json"), &v.to_string()).unwrap()
    }

    #[test]
    fn test_absent_sections_are_empty() {
        let f = parse(json!({}));
        assert!(f.run_results().is_empty());
        assert!(f.records(&ScoreExtractor::default()).unwrap().is_empty());

        let f = parse(json!({"run_metadata": [], "run_results": {"x": 1}}));
        assert!(f.run_results().is_empty());
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        for text in ["[1, 2]", "[]", "[{\"run_id\": \"r\"}, []]", "\"run\"", "null"] {
            let err = ResultFile::parse(Path::new("run.json"), text).unwrap_err();
            assert!(matches!(err, TallyError::InputDecode { .. }), "{text}");
        }
    }

    #[test]
    fn test_missing_model_fails_validation() {
        let f = parse(json!({
            "run_metadata": {"run_id": "r", "test_id": "t", "start_time": "s", "end_time": "e", "duration": 1},
            "run_results": [{"metadata": {"metric": {"name": "acc"}}, "results": {}}]
        }));
        let err = f.records(&ScoreExtractor::default()).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "model" });
    }

    #[test]
    fn test_duration_as_string_and_wrong_types() {
        assert_eq!(
            decimal_field(Some(&json!("2.50"))).unwrap().unwrap().to_string(),
            "2.50"
        );
        assert!(decimal_field(Some(&json!("fast"))).is_err());
        assert!(decimal_field(Some(&json!(true))).is_err());
        assert!(string_field("run_id", Some(&json!(42))).is_err());
    }
}

use crate::errors::ValidationError;
use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

/// Flattened score path -> score value.
pub type Scores = Map<String, Value>;

/// Unvalidated field set for a `ResultRecord`.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub run_id: String,
    pub test_id: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: Option<Number>,
    pub metric: String,
    pub model: String,
    pub scores: Scores,
    pub raw_data_file: String,
}

/// One (test, metric, model) measurement taken from a result file.
///
/// Only obtainable through [`ResultRecord::new`], so every instance holds
/// non-empty identifiers and a strictly positive duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    run_id: String,
    test_id: String,
    start_time: String,
    end_time: String,
    duration: Number,
    metric: String,
    model: String,
    scores: Scores,
    raw_data_file: String,
}

impl ResultRecord {
    pub fn new(fields: RecordFields) -> Result<Self, ValidationError> {
        non_empty("run_id", &fields.run_id)?;
        non_empty("test_id", &fields.test_id)?;
        non_empty("start_time", &fields.start_time)?;
        non_empty("end_time", &fields.end_time)?;
        let duration = positive_duration(fields.duration)?;
        non_empty("metric", &fields.metric)?;
        non_empty("model", &fields.model)?;
        non_empty("raw_data_file", &fields.raw_data_file)?;

        Ok(Self {
            run_id: fields.run_id,
            test_id: fields.test_id,
            start_time: fields.start_time,
            end_time: fields.end_time,
            duration,
            metric: fields.metric,
            model: fields.model,
            scores: fields.scores,
            raw_data_file: fields.raw_data_file,
        })
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// Duration in seconds, exactly as written in the source file.
    pub fn duration(&self) -> &Number {
        &self.duration
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn raw_data_file(&self) -> &str {
        &self.raw_data_file
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn positive_duration(duration: Option<Number>) -> Result<Number, ValidationError> {
    // An absent duration is treated as zero.
    let Some(n) = duration else {
        return Err(ValidationError::NonPositiveDuration {
            value: "0".to_string(),
        });
    };
    let text = n.to_string();
    let dec = BigDecimal::from_str(&text).map_err(|_| ValidationError::NotADecimal {
        value: text.clone(),
    })?;
    if dec <= BigDecimal::from(0) {
        return Err(ValidationError::NonPositiveDuration { value: text });
    }
    Ok(n)
}

/// Derived primary and secondary index keys of a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKeys {
    pub pk: String,
    pub sk: String,
    pub gsi1pk: String,
    pub gsi1sk: String,
}

impl RecordKeys {
    pub fn derive(record: &ResultRecord) -> Self {
        use crate::storage::schema::{MODEL_PREFIX, RUN_PREFIX};
        Self {
            pk: format!("{RUN_PREFIX}{}", record.run_id),
            sk: format!("{}#{}", record.start_time, record.metric),
            gsi1pk: format!("{MODEL_PREFIX}{}", record.model),
            gsi1sk: record.start_time.clone(),
        }
    }
}

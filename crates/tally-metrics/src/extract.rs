use crate::flatten::{flatten, KEY_SEPARATOR};
use crate::matcher::MetricMatch;
use serde_json::{Map, Value};
use tally_core::Scores;

/// Detail keys dropped from every matched metric block.
pub const DEFAULT_IGNORE_KEYS: [&str; 2] = ["individual_scores", "grading_criteria"];

/// Detail keys that never become scores. Only the first level of a metric
/// block is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreList(Vec<String>);

impl IgnoreList {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORE_KEYS)
    }
}

/// Builds the flat score map of one result entry from its `evaluation_summary`.
#[derive(Debug, Clone, Default)]
pub struct ScoreExtractor {
    pub matching: MetricMatch,
    pub ignore: IgnoreList,
}

impl ScoreExtractor {
    pub fn new(matching: MetricMatch, ignore: IgnoreList) -> Self {
        Self { matching, ignore }
    }

    /// Merge every matching metric block into one map. Nested objects become
    /// compound keys rooted at their detail key; on collisions the block that
    /// comes later in the summary wins.
    pub fn extract(&self, evaluation_summary: &Map<String, Value>, metric_name: &str) -> Scores {
        let mut scores = Scores::new();

        for (summary_key, block) in evaluation_summary {
            if !self.matching.matches(summary_key, metric_name) {
                continue;
            }
            let Value::Object(detail) = block else {
                continue;
            };

            for (key, value) in detail {
                if self.ignore.contains(key) {
                    continue;
                }
                match value {
                    Value::Object(nested) => scores.extend(flatten(nested, key, KEY_SEPARATOR)),
                    leaf => {
                        scores.insert(key.clone(), leaf.clone());
                    }
                }
            }
        }

        scores
    }
}

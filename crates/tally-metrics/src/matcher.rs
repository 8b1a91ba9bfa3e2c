use std::fmt;

/// How an `evaluation_summary` key is matched against a test's metric name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricMatch {
    /// The key occurs anywhere inside the metric name (`"acc"` matches
    /// `"acc-adv"`). Overlapping names can select more than one block.
    #[default]
    Contains,
    /// The key equals the metric name.
    Exact,
}

impl MetricMatch {
    pub fn matches(&self, summary_key: &str, metric_name: &str) -> bool {
        match self {
            MetricMatch::Contains => metric_name.contains(summary_key),
            MetricMatch::Exact => summary_key == metric_name,
        }
    }
}

impl fmt::Display for MetricMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetricMatch::Contains => "contains",
            MetricMatch::Exact => "exact",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_substring_of_metric_name() {
        let m = MetricMatch::Contains;
        assert!(m.matches("accuracy", "accuracy"));
        assert!(m.matches("accuracy", "accuracy-adversarial"));
        assert!(!m.matches("weighted_accuracy", "accuracy"));
    }

    #[test]
    fn test_exact() {
        let m = MetricMatch::Exact;
        assert!(m.matches("accuracy", "accuracy"));
        assert!(!m.matches("accuracy", "accuracy-adversarial"));
    }
}

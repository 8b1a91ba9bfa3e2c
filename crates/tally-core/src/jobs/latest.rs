//! Latest record per model, discovered from the GSI1 partition keys.

use crate::errors::Result;
use crate::output::write_json;
use crate::storage::attr::{item_to_json, NumberMode};
use crate::storage::schema::{ATTR_GSI1PK, MODEL_PREFIX};
use crate::storage::{IndexQuery, Item, TableStore};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Model names carried by `MODEL#<name>` partition keys, deduplicated.
/// Items without a matching key are ignored.
pub fn distinct_models(items: &[Item]) -> BTreeSet<String> {
    items
        .iter()
        .filter_map(|item| {
            let key = item.get(ATTR_GSI1PK)?.as_s().ok()?;
            key.strip_prefix(MODEL_PREFIX).map(str::to_string)
        })
        .collect()
}

/// Scan the partition keys (one page), then query GSI1 once per model for its
/// newest record. A model whose query comes back empty is left out.
pub async fn fetch_latest_per_model(store: &dyn TableStore) -> Result<BTreeMap<String, Value>> {
    let scanned = store.scan(&[ATTR_GSI1PK]).await?;
    let models = distinct_models(&scanned);
    tracing::info!(
        event = "tally.fetch.models",
        table = %store.table_name(),
        scanned = scanned.len(),
        models = models.len()
    );

    let mut latest = BTreeMap::new();
    for model in models {
        let query = IndexQuery::latest_in_gsi1(format!("{MODEL_PREFIX}{model}"));
        let items = store.query(&query).await?;
        match items.first() {
            Some(item) => {
                latest.insert(model, item_to_json(item, NumberMode::Exact));
            }
            None => {
                tracing::debug!(event = "tally.fetch.model_without_records", model = %model);
            }
        }
    }

    Ok(latest)
}

pub fn write_latest(path: &Path, latest: &BTreeMap<String, Value>) -> Result<()> {
    write_json(path, latest)?;
    tracing::info!(
        event = "tally.fetch.written",
        path = %path.display(),
        models = latest.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;

    fn key_item(key: &str) -> Item {
        Item::from([(ATTR_GSI1PK.to_string(), AttributeValue::S(key.into()))])
    }

    #[test]
    fn test_distinct_models() {
        let items = vec![
            key_item("MODEL#gpt-4o"),
            key_item("MODEL#claude"),
            key_item("MODEL#gpt-4o"),
            key_item("RUN#r1"),
            Item::new(),
        ];
        let models = distinct_models(&items);
        assert_eq!(
            models,
            BTreeSet::from(["claude".to_string(), "gpt-4o".to_string()])
        );
    }

    #[test]
    fn test_name_keeps_everything_after_prefix() {
        let models = distinct_models(&[key_item("MODEL#org#model-v2")]);
        assert!(models.contains("org#model-v2"));
    }

    #[test]
    fn test_non_string_key_is_ignored() {
        let item = Item::from([(ATTR_GSI1PK.to_string(), AttributeValue::N("1".into()))]);
        assert!(distinct_models(&[item]).is_empty());
    }
}

//! Persistence of validated result records.

use crate::errors::Result;
use crate::model::{RecordKeys, ResultRecord};
use crate::storage::attr::json_map_to_attrs;
use crate::storage::schema::{ATTR_GSI1PK, ATTR_GSI1SK, ATTR_PK, ATTR_SK};
use crate::storage::{Item, TableStore};
use aws_sdk_dynamodb::types::AttributeValue;

/// The persisted form of a record: derived keys plus every record field.
pub fn record_to_item(record: &ResultRecord) -> Item {
    let keys = RecordKeys::derive(record);
    let s = |v: &str| AttributeValue::S(v.to_string());

    Item::from([
        (ATTR_PK.to_string(), AttributeValue::S(keys.pk)),
        (ATTR_SK.to_string(), AttributeValue::S(keys.sk)),
        (ATTR_GSI1PK.to_string(), AttributeValue::S(keys.gsi1pk)),
        (ATTR_GSI1SK.to_string(), AttributeValue::S(keys.gsi1sk)),
        ("run_id".to_string(), s(record.run_id())),
        ("test_id".to_string(), s(record.test_id())),
        ("start_time".to_string(), s(record.start_time())),
        ("end_time".to_string(), s(record.end_time())),
        ("duration".to_string(), AttributeValue::N(record.duration().to_string())),
        ("metric".to_string(), s(record.metric())),
        ("model".to_string(), s(record.model())),
        ("scores".to_string(), AttributeValue::M(json_map_to_attrs(record.scores()))),
        ("raw_data_file".to_string(), s(record.raw_data_file())),
    ])
}

/// Batch-write every record. A failure part-way through may leave earlier
/// batches written.
pub async fn write_records(store: &dyn TableStore, records: &[ResultRecord]) -> Result<usize> {
    let items: Vec<Item> = records.iter().map(record_to_item).collect();
    let count = items.len();
    store.batch_put(items).await?;
    tracing::info!(
        event = "tally.ingest.written",
        table = %store.table_name(),
        records = count
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordFields, Scores};
    use serde_json::{json, Number};
    use std::str::FromStr;

    #[test]
    fn test_item_carries_keys_and_fields() {
        let mut scores = Scores::new();
        scores.insert("precision".into(), json!(0.9));
        scores.insert("label".into(), json!("ok"));

        let record = ResultRecord::new(RecordFields {
            run_id: "r1".into(),
            test_id: "t1".into(),
            start_time: "2025-01-01T00:00:00Z".into(),
            end_time: "2025-01-01T00:01:00Z".into(),
            duration: Some(Number::from_str("60.250").unwrap()),
            metric: "acc".into(),
            model: "gpt-4".into(),
            scores,
            raw_data_file: "run.json".into(),
        })
        .unwrap();

        let item = record_to_item(&record);
        assert_eq!(item["PK"], AttributeValue::S("RUN#r1".into()));
        assert_eq!(item["SK"], AttributeValue::S("2025-01-01T00:00:00Z#acc".into()));
        assert_eq!(item["GSI1PK"], AttributeValue::S("MODEL#gpt-4".into()));
        assert_eq!(item["GSI1SK"], AttributeValue::S("2025-01-01T00:00:00Z".into()));
        assert_eq!(item["duration"], AttributeValue::N("60.250".into()));
        assert_eq!(item.len(), 13);

        let scores = item["scores"].as_m().unwrap();
        assert_eq!(scores["precision"], AttributeValue::N("0.9".into()));
        assert_eq!(scores["label"], AttributeValue::S("ok".into()));
    }
}

pub mod attr;
pub mod dynamodb;
pub mod memory;
pub mod schema;

use crate::errors::Result;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

pub use dynamodb::DynamoTable;
pub use memory::MemoryTable;

/// One table item: attribute name -> attribute value.
pub type Item = HashMap<String, AttributeValue>;

/// Partition-key equality query against a secondary index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub index_name: String,
    pub partition_attr: String,
    pub partition_value: String,
    /// Sort attribute of the index; used by in-process stores to order results.
    pub sort_attr: String,
    pub descending: bool,
    pub limit: Option<i32>,
}

impl IndexQuery {
    /// The most recent item of a GSI1 partition.
    pub fn latest_in_gsi1(partition_value: impl Into<String>) -> Self {
        Self {
            index_name: schema::INDEX_GSI1.to_string(),
            partition_attr: schema::ATTR_GSI1PK.to_string(),
            partition_value: partition_value.into(),
            sort_attr: schema::ATTR_GSI1SK.to_string(),
            descending: true,
            limit: Some(1),
        }
    }
}

/// The three table primitives the jobs are written against.
///
/// Scans and queries read a single response page; callers never follow
/// continuation keys.
#[async_trait]
pub trait TableStore: Send + Sync {
    fn table_name(&self) -> &str;

    /// Full-table scan, optionally projected to the given attributes.
    async fn scan(&self, projection: &[&str]) -> Result<Vec<Item>>;

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>>;

    /// Put every item. No atomicity across the batch.
    async fn batch_put(&self, items: Vec<Item>) -> Result<()>;
}

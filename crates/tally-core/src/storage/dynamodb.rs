//! DynamoDB implementation of [`TableStore`].

use super::schema::MAX_BATCH_WRITE;
use super::{IndexQuery, Item, TableStore};
use crate::config::ClientConfig;
use crate::errors::{Result, TallyError};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use aws_smithy_types::timeout::TimeoutConfig;
use std::time::Duration;

/// Resubmissions of `UnprocessedItems` per chunk before the write is reported as failed.
pub const MAX_UNPROCESSED_ROUNDS: usize = 8;

#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl std::fmt::Debug for DynamoTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoTable")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl DynamoTable {
    /// Build a client from the SDK default chain, then apply region, endpoint
    /// and timeout overrides. No request is sent here.
    pub async fn connect(config: &ClientConfig, table_name: impl Into<String>) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_dynamodb::config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        if let Some(timeout_ms) = config.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        Self::from_client(Client::from_conf(builder.build()), table_name)
    }

    pub fn from_client(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn write_request(item: Item) -> Result<WriteRequest> {
        let put = PutRequest::builder()
            .set_item(Some(item))
            .build()
            .map_err(|e| TallyError::table(format!("invalid put request: {e}")))?;
        Ok(WriteRequest::builder().put_request(put).build())
    }
}

#[async_trait]
impl TableStore for DynamoTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan(&self, projection: &[&str]) -> Result<Vec<Item>> {
        let mut request = self.client.scan().table_name(&self.table_name);

        if !projection.is_empty() {
            let mut placeholders = Vec::with_capacity(projection.len());
            for (i, attr) in projection.iter().enumerate() {
                let placeholder = format!("#p{i}");
                request = request.expression_attribute_names(placeholder.clone(), *attr);
                placeholders.push(placeholder);
            }
            request = request.projection_expression(placeholders.join(", "));
        }

        let response = request.send().await.map_err(|e| {
            TallyError::table(format!("DynamoDB Scan failed: {}", DisplayErrorContext(&e)))
        })?;

        Ok(response.items().to_vec())
    }

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&query.index_name)
            .key_condition_expression("#pk = :pk")
            .expression_attribute_names("#pk", &query.partition_attr)
            .expression_attribute_values(":pk", AttributeValue::S(query.partition_value.clone()))
            .scan_index_forward(!query.descending);

        if let Some(limit) = query.limit {
            request = request.limit(limit);
        }

        let response = request.send().await.map_err(|e| {
            TallyError::table(format!("DynamoDB Query failed: {}", DisplayErrorContext(&e)))
        })?;

        Ok(response.items().to_vec())
    }

    async fn batch_put(&self, items: Vec<Item>) -> Result<()> {
        let requests = items
            .into_iter()
            .map(Self::write_request)
            .collect::<Result<Vec<_>>>()?;

        for chunk in requests.chunks(MAX_BATCH_WRITE) {
            let mut pending = chunk.to_vec();
            let mut rounds = 0;

            while !pending.is_empty() {
                if rounds == MAX_UNPROCESSED_ROUNDS {
                    return Err(TallyError::table(format!(
                        "DynamoDB BatchWriteItem left {} item(s) unprocessed after {} attempts",
                        pending.len(),
                        rounds
                    )));
                }
                rounds += 1;

                let response = self
                    .client
                    .batch_write_item()
                    .request_items(&self.table_name, pending)
                    .send()
                    .await
                    .map_err(|e| {
                        TallyError::table(format!(
                            "DynamoDB BatchWriteItem failed: {}",
                            DisplayErrorContext(&e)
                        ))
                    })?;

                pending = response
                    .unprocessed_items()
                    .and_then(|m| m.get(&self.table_name))
                    .cloned()
                    .unwrap_or_default();

                if !pending.is_empty() {
                    tracing::debug!(
                        event = "tally.table.unprocessed",
                        table = %self.table_name,
                        unprocessed = pending.len(),
                        round = rounds
                    );
                }
            }
        }

        Ok(())
    }
}

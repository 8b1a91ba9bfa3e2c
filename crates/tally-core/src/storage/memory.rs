//! In-process [`TableStore`] used by tests and local runs.

use super::schema::{ATTR_PK, ATTR_SK, MAX_BATCH_WRITE};
use super::{IndexQuery, Item, TableStore};
use crate::errors::{Result, TallyError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

/// Items are kept in insertion order; a put with an existing `(PK, SK)` replaces
/// the stored item. Like `BatchWriteItem`, a request (one chunk of up to
/// `MAX_BATCH_WRITE` items) that repeats a primary key is rejected whole;
/// earlier chunks stay written. Index sort attributes are compared as strings, and items
/// without a string sort attribute are not part of the index.
#[derive(Debug, Default)]
pub struct MemoryTable {
    table_name: String,
    items: Mutex<Vec<Item>>,
    queries: Mutex<Vec<IndexQuery>>,
}

impl MemoryTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    pub fn with_items(table_name: impl Into<String>, items: Vec<Item>) -> Self {
        let table = Self::new(table_name);
        if let Ok(mut guard) = table.items.lock() {
            *guard = items;
        }
        table
    }

    pub fn items(&self) -> Result<Vec<Item>> {
        Ok(lock(&self.items)?.clone())
    }

    /// Queries issued so far, oldest first.
    pub fn recorded_queries(&self) -> Result<Vec<IndexQuery>> {
        Ok(lock(&self.queries)?.clone())
    }
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| TallyError::table("memory table lock poisoned"))
}

fn primary_key(item: &Item) -> Option<(&str, &str)> {
    let pk = item.get(ATTR_PK)?.as_s().ok()?;
    let sk = item.get(ATTR_SK)?.as_s().ok()?;
    Some((pk.as_str(), sk.as_str()))
}

#[async_trait]
impl TableStore for MemoryTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan(&self, projection: &[&str]) -> Result<Vec<Item>> {
        let items = lock(&self.items)?;
        if projection.is_empty() {
            return Ok(items.clone());
        }
        Ok(items
            .iter()
            .map(|item| {
                item.iter()
                    .filter(|(k, _)| projection.contains(&k.as_str()))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .collect())
    }

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Item>> {
        lock(&self.queries)?.push(query.clone());

        let items = lock(&self.items)?;
        let mut matched: Vec<(&str, &Item)> = items
            .iter()
            .filter(|item| {
                item.get(&query.partition_attr)
                    .and_then(|v| v.as_s().ok())
                    .is_some_and(|v| *v == query.partition_value)
            })
            .filter_map(|item| {
                let sort = item.get(&query.sort_attr)?.as_s().ok()?;
                Some((sort.as_str(), item))
            })
            .collect();

        matched.sort_by(|a, b| a.0.cmp(b.0));
        if query.descending {
            matched.reverse();
        }

        let limit = query
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .take(limit)
            .map(|(_, item)| item.clone())
            .collect())
    }

    async fn batch_put(&self, new_items: Vec<Item>) -> Result<()> {
        let mut items = lock(&self.items)?;
        for chunk in new_items.chunks(MAX_BATCH_WRITE) {
            let mut seen = HashSet::new();
            if chunk
                .iter()
                .filter_map(primary_key)
                .any(|key| !seen.insert(key))
            {
                return Err(TallyError::table(
                    "Provided list of item keys contains duplicates",
                ));
            }

            for item in chunk {
                let existing = primary_key(item)
                    .and_then(|key| items.iter().position(|i| primary_key(i) == Some(key)));
                match existing {
                    Some(pos) => items[pos] = item.clone(),
                    None => items.push(item.clone()),
                }
            }
        }
        Ok(())
    }
}

//! Top-N snapshot: rank every scanned item by `rating` and keep the best.

use crate::errors::{Result, TallyError};
use crate::output::write_json;
use crate::storage::attr::{item_to_json, NumberMode};
use crate::storage::schema::ATTR_RATING;
use crate::storage::{Item, TableStore};
use bigdecimal::BigDecimal;
use serde_json::Value;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/top_foods.json";

/// Scan one page of the table and return the `limit` highest-rated items,
/// best first, with numbers downgraded to floats.
///
/// Every item must carry a numeric `rating`. Equal ratings keep scan order.
pub async fn top_rated(store: &dyn TableStore, limit: usize) -> Result<Vec<Value>> {
    let items = store.scan(&[]).await?;
    tracing::info!(
        event = "tally.snapshot.scanned",
        table = %store.table_name(),
        items = items.len()
    );
    Ok(rank_by_rating(items, limit)?
        .iter()
        .map(|item| item_to_json(item, NumberMode::Float))
        .collect())
}

pub fn rank_by_rating(items: Vec<Item>, limit: usize) -> Result<Vec<Item>> {
    let mut ranked = items
        .into_iter()
        .map(|item| Ok((rating(&item)?, item)))
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.truncate(limit);
    Ok(ranked.into_iter().map(|(_, item)| item).collect())
}

fn rating(item: &Item) -> Result<BigDecimal> {
    let attr = item
        .get(ATTR_RATING)
        .ok_or_else(|| TallyError::item(format!("item has no '{ATTR_RATING}' attribute")))?;
    let n = attr
        .as_n()
        .map_err(|_| TallyError::item(format!("'{ATTR_RATING}' is not a number: {attr:?}")))?;
    BigDecimal::from_str(n)
        .map_err(|e| TallyError::item(format!("'{ATTR_RATING}' is not a number ({n}): {e}")))
}

pub fn write_snapshot(path: &Path, items: &[Value]) -> Result<()> {
    write_json(path, items)?;
    tracing::info!(
        event = "tally.snapshot.written",
        path = %path.display(),
        items = items.len()
    );
    Ok(())
}

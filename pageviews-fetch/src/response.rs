//! Extraction of record lists from upstream response bodies.
//!
//! Time series endpoints answer `{"items": [...]}`. Top-list endpoints wrap
//! the list once more: `{"items": [{"articles": [...]}]}`.

use pageviews_core::{Row, Table};
use serde_json::Value;

use crate::error::FetchError;

/// Key of the outer record list.
pub const ITEMS_KEY: &str = "items";

/// Reads `body.items` as a table.
pub fn items_table(body: &Value) -> Result<Table, FetchError> {
    let items = body
        .get(ITEMS_KEY)
        .ok_or_else(|| FetchError::MissingKey(ITEMS_KEY.to_string()))?;
    records_table(items, ITEMS_KEY)
}

/// Reads `body.items[0].<key>` as a table.
pub fn first_item_table(body: &Value, key: &str) -> Result<Table, FetchError> {
    let first = body
        .get(ITEMS_KEY)
        .and_then(|items| items.get(0))
        .ok_or_else(|| FetchError::MissingKey(format!("{ITEMS_KEY}[0]")))?;
    let records = first
        .get(key)
        .ok_or_else(|| FetchError::MissingKey(format!("{ITEMS_KEY}[0].{key}")))?;
    records_table(records, key)
}

fn records_table(records: &Value, path: &str) -> Result<Table, FetchError> {
    let array = records
        .as_array()
        .ok_or_else(|| FetchError::InvalidResponse(format!("{path} is not an array")))?;

    let rows = array
        .iter()
        .map(|record| match record {
            Value::Object(map) => Ok(map.clone()),
            other => Err(FetchError::InvalidResponse(format!(
                "{path} contains a non-object record: {other}"
            ))),
        })
        .collect::<Result<Vec<Row>, _>>()?;

    Ok(Table::from_rows(rows))
}

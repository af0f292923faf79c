//! JSON output formatting.

use anyhow::Result;
use pageviews_core::Table;
use serde::Serialize;

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a table as an array of row objects, at most `limit` rows.
    pub fn format_table(&self, table: &Table, limit: Option<usize>) -> Result<String> {
        match limit {
            Some(n) if n < table.len() => self.format(&table.clone().head(n)),
            _ => self.format(table),
        }
    }
}

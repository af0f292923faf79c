//! Labeled-column table holding normalized result rows.
//!
//! Rows are JSON objects keyed by column name. Every row carries every
//! column; values missing upstream are stored as `null`.
//!
//! A table with no rows is schema-neutral: it concatenates with anything and
//! column-level operations on it never fail.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::TableError;

/// One table row.
pub type Row = Map<String, Value>;

// ============================================================================
// Table
// ============================================================================

/// Ordered collection of rows sharing one column set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from rows.
    ///
    /// Columns are ordered by first appearance across all rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = rows
            .into_iter()
            .map(|mut row| {
                for column in &columns {
                    row.entry(column.clone()).or_insert(Value::Null);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if `name` is a column of this table.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Value at (`row`, `column`).
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>, TableError> {
        self.require(name)?;
        Ok(self.rows.iter().filter_map(|r| r.get(name)).collect())
    }

    fn require(&self, name: &str) -> Result<(), TableError> {
        if self.has_column(name) || self.rows.is_empty() {
            Ok(())
        } else {
            Err(TableError::MissingColumn(name.to_string()))
        }
    }

    /// Renames column `from` to `to`.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), TableError> {
        self.require(from)?;
        let Some(position) = self.columns.iter().position(|c| c == from) else {
            return Ok(());
        };
        self.columns[position] = to.to_string();
        for row in &mut self.rows {
            if let Some(value) = row.remove(from) {
                row.insert(to.to_string(), value);
            }
        }
        Ok(())
    }

    /// Replaces string values of `column` that equal a `from` with its `to`.
    pub fn replace_values(
        &mut self,
        column: &str,
        replacements: &[(&str, &str)],
    ) -> Result<(), TableError> {
        self.require(column)?;
        for row in &mut self.rows {
            let Some(Value::String(current)) = row.get_mut(column) else {
                continue;
            };
            if let Some((_, to)) = replacements.iter().find(|(from, _)| from == current) {
                *current = (*to).to_string();
            }
        }
        Ok(())
    }

    /// Sets `column` to `value` on every row, adding the column if needed.
    pub fn assign(&mut self, column: &str, value: impl Into<Value>) {
        let value = value.into();
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
        for row in &mut self.rows {
            row.insert(column.to_string(), value.clone());
        }
    }

    /// Sets `column` to the 1-based row position, adding the column if needed.
    pub fn assign_rank(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.insert(column.to_string(), Value::from(index as u64 + 1));
        }
    }

    /// Concatenates tables in order.
    ///
    /// Non-empty tables must share the same column set; column order follows
    /// the first non-empty table.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Result<Table, TableError> {
        let mut result = Table::new();
        for table in tables {
            if table.rows.is_empty() {
                continue;
            }
            if result.rows.is_empty() {
                result = table;
                continue;
            }
            if !same_columns(&result.columns, &table.columns) {
                return Err(TableError::SchemaMismatch {
                    left: result.columns.clone(),
                    right: table.columns,
                });
            }
            result.rows.extend(table.rows);
        }
        Ok(result)
    }

    /// Groups rows by `keys` and sums `sum_column` within each group.
    ///
    /// The result has the key columns followed by `sum_column`, one row per
    /// group, ordered by ascending key values. Null values do not contribute
    /// to the sum.
    pub fn group_by_sum(&self, keys: &[&str], sum_column: &str) -> Result<Table, TableError> {
        for key in keys {
            self.require(key)?;
        }
        self.require(sum_column)?;

        let mut groups: BTreeMap<Vec<String>, (Vec<Value>, Sum)> = BTreeMap::new();
        for row in &self.rows {
            let values: Vec<Value> = keys
                .iter()
                .map(|k| row.get(*k).cloned().unwrap_or(Value::Null))
                .collect();
            let group_key = values.iter().map(sort_key).collect();
            let entry = groups
                .entry(group_key)
                .or_insert_with(|| (values, Sum::Int(0)));

            match row.get(sum_column) {
                None | Some(Value::Null) => {}
                Some(value) => entry.1.add(sum_column, value)?,
            }
        }

        let mut columns: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        columns.push(sum_column.to_string());

        let rows = groups
            .into_values()
            .map(|(values, sum)| {
                let mut row = Row::new();
                for (key, value) in keys.iter().zip(values) {
                    row.insert((*key).to_string(), value);
                }
                row.insert(sum_column.to_string(), sum.into_value());
                row
            })
            .collect();

        Ok(Table { columns, rows })
    }

    /// Sorts rows by a numeric column, largest first.
    ///
    /// The sort is stable: rows with equal values keep their relative order.
    /// Nulls sort last.
    pub fn sort_by_desc(&mut self, column: &str) -> Result<(), TableError> {
        self.require(column)?;
        let offending = self
            .rows
            .iter()
            .filter_map(|r| r.get(column))
            .find(|v| !v.is_null() && !v.is_number());
        if let Some(value) = offending {
            return Err(TableError::NonNumeric {
                column: column.to_string(),
                value: value.to_string(),
            });
        }

        self.rows.sort_by(|a, b| {
            let a = a.get(column).and_then(Value::as_f64);
            let b = b.get(column).and_then(Value::as_f64);
            match (a, b) {
                (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
        Ok(())
    }

    /// Keeps at most the first `n` rows.
    pub fn head(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }
}

impl Serialize for Table {
    /// Serializes as an array of row objects with keys in column order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&OrderedRow {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct OrderedRow<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for OrderedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in self.columns {
            map.serialize_entry(column, self.row.get(column).unwrap_or(&Value::Null))?;
        }
        map.end()
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn same_columns(left: &[String], right: &[String]) -> bool {
    let mut left: Vec<&String> = left.iter().collect();
    let mut right: Vec<&String> = right.iter().collect();
    left.sort();
    right.sort();
    left == right
}

fn sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Running sum that stays integral until a float shows up.
enum Sum {
    Int(i64),
    Float(f64),
}

impl Sum {
    fn add(&mut self, column: &str, value: &Value) -> Result<(), TableError> {
        if let Some(n) = value.as_i64() {
            match self {
                Self::Int(total) => *total = total.saturating_add(n),
                Self::Float(total) => *total += n as f64,
            }
            return Ok(());
        }

        let n = value.as_f64().ok_or_else(|| TableError::NonNumeric {
            column: column.to_string(),
            value: value.to_string(),
        })?;
        *self = Self::Float(self.as_f64() + n);
        Ok(())
    }

    fn as_f64(&self) -> f64 {
        match self {
            Self::Int(total) => *total as f64,
            Self::Float(total) => *total,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Self::Int(total) => Value::from(total),
            Self::Float(total) => Value::from(total),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

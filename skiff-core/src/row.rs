use crate::Value;
use std::sync::Arc;

/// Shared reference-counted column name list.
pub type RowNames = Arc<[String]>;
/// Owned row value slice matching `RowNames` length.
pub type Row = Box<[Value]>;

/// A result row with its corresponding column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLabeled {
    /// Column names.
    pub labels: RowNames,
    /// Data values (aligned by index with `labels`).
    pub values: Row,
}

impl RowLabeled {
    pub fn new(labels: RowNames, values: Row) -> Self {
        Self { labels, values }
    }

    pub fn names(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Duplicate labels resolve to the rightmost occurrence.
    pub fn get_column(&self, name: &str) -> Option<&Value> {
        self.labels
            .iter()
            .rposition(|v| v == name)
            .map(|i| &self.values[i])
    }
}

/// All rows one statement produced, with their column labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: RowNames,
    pub rows: Vec<Row>,
}

impl ResultSet {
    pub fn new(columns: RowNames, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Objectified view: one labeled row per data row.
    pub fn records(&self) -> impl Iterator<Item = RowLabeled> + '_ {
        self.rows
            .iter()
            .map(|row| RowLabeled::new(self.columns.clone(), row.clone()))
    }

    pub fn first_record(&self) -> Option<RowLabeled> {
        self.records().next()
    }
}

/// Metadata about modify operations (INSERT/UPDATE/DELETE).
#[derive(Default, Debug, Clone, Copy)]
pub struct RowsAffected {
    /// Total number of rows impacted.
    pub rows_affected: u64,
    /// Backend-specific last inserted / affected identifier when available.
    pub last_affected_id: Option<i64>,
}

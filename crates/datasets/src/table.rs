//! Immutable In-Memory Tables

use serde::Serialize;

use crate::{Record, TableKind};

/// Rows of one source table plus its normalized column names
///
/// A table never changes after it is built; share it by reference.
#[derive(Debug, Clone)]
pub struct Table<T> {
    columns: Vec<String>,
    rows: Vec<T>,
}

impl<T: Record> Table<T> {
    /// Build a table from already-normalized columns and rows
    pub fn new(columns: Vec<String>, rows: Vec<T>) -> Self {
        Self { columns, rows }
    }

    /// Build a table with the canonical columns for `T`
    pub fn from_rows(rows: Vec<T>) -> Self {
        let columns = T::KIND
            .required_columns()
            .iter()
            .map(|c| c.to_string())
            .collect();
        Self::new(columns, rows)
    }

    /// Which source table this is
    pub fn kind(&self) -> TableKind {
        T::KIND
    }

    /// All rows in source order
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Normalized (lowercase) column names in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// First `n` rows, or all of them when the table is shorter
    pub fn head(&self, n: usize) -> &[T] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Overview entry for this table
    pub fn summary(&self) -> TableSummary {
        TableSummary {
            table: T::KIND,
            rows: self.rows.len(),
            columns: self.columns.clone(),
        }
    }
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self::from_rows(Vec::new())
    }
}

/// Shape and columns of a loaded table
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table: TableKind,
    pub rows: usize,
    pub columns: Vec<String>,
}

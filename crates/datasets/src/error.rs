//! Dataset Error Types

use std::path::PathBuf;
use thiserror::Error;

use crate::TableKind;

/// A source table could not be loaded.
///
/// Every variant is fatal to the session: no query can be answered until
/// all three tables are available.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Source file could not be opened or read
    #[error("{table} data unavailable: cannot read {}: {source}", path.display())]
    Io {
        table: TableKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV
    #[error("{table} data unavailable: {source}")]
    Csv {
        table: TableKind,
        #[source]
        source: csv_async::Error,
    },

    /// A data row that does not fit the table's column types
    #[error("{table} data unavailable: bad row at line {line}: {source}")]
    BadRow {
        table: TableKind,
        line: u64,
        #[source]
        source: csv_async::Error,
    },

    /// Header row lacks a required column
    #[error("{table} data unavailable: missing column `{column}`")]
    MissingColumn {
        table: TableKind,
        column: &'static str,
    },
}

impl DatasetError {
    /// Table that failed to load
    pub fn table(&self) -> TableKind {
        match self {
            DatasetError::Io { table, .. }
            | DatasetError::Csv { table, .. }
            | DatasetError::BadRow { table, .. }
            | DatasetError::MissingColumn { table, .. } => *table,
        }
    }
}

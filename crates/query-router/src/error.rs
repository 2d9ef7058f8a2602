//! Query Error Types

use datasets::TableKind;
use thiserror::Error;

/// Conditions a query can hit before producing an answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Aggregate over a table (or column) with nothing in it
    #[error("the {table} table has no {column} values")]
    EmptyTable {
        table: TableKind,
        column: &'static str,
    },

    /// Empty or whitespace-only input; callers reject it before routing
    #[error("query is blank")]
    BlankQuery,
}

/// Check the non-empty precondition callers enforce before routing
pub fn validate_query(query: &str) -> Result<&str, QueryError> {
    if query.trim().is_empty() {
        Err(QueryError::BlankQuery)
    } else {
        Ok(query)
    }
}

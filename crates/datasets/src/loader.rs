//! CSV Table Loader

use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures_util::StreamExt;
use std::path::Path;
use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::{DatasetError, Record, Table};

/// Canonical form of a header cell
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read a table from any CSV byte stream
///
/// Header names are lowercased before rows are deserialized, and every
/// column the router depends on must be present.
pub async fn read_table<T, R>(reader: R) -> Result<Table<T>, DatasetError>
where
    T: Record,
    R: AsyncRead + Unpin + Send,
{
    let table = T::KIND;
    let mut csv = AsyncReaderBuilder::new()
        .trim(Trim::All)
        .create_reader(reader);

    let headers: StringRecord = csv
        .headers()
        .await
        .map_err(|source| DatasetError::Csv { table, source })?
        .iter()
        .map(normalize_column)
        .collect();

    if let Some(column) = table
        .required_columns()
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DatasetError::MissingColumn {
            table,
            column: *column,
        });
    }

    let mut rows = Vec::new();
    let mut records = csv.records();
    while let Some(record) = records.next().await {
        let record = record.map_err(|source| DatasetError::Csv { table, source })?;
        let row = record
            .deserialize::<T>(Some(&headers))
            .map_err(|source| DatasetError::BadRow {
                table,
                line: record.position().map(|p| p.line()).unwrap_or(0),
                source,
            })?;
        rows.push(row);
    }

    debug!("Parsed {} rows for {} table", rows.len(), table);
    Ok(Table::new(headers.iter().map(String::from).collect(), rows))
}

/// Load a table from a CSV file
pub async fn load_table<T: Record>(path: impl AsRef<Path>) -> Result<Table<T>, DatasetError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| DatasetError::Io {
            table: T::KIND,
            path: path.to_path_buf(),
            source,
        })?;

    let loaded = read_table::<T, _>(file).await?;
    info!(
        "Loaded {} table from {}: {} rows x {} columns",
        T::KIND,
        path.display(),
        loaded.len(),
        loaded.columns().len()
    );
    Ok(loaded)
}

//! CNC Maintenance Datasets
//!
//! Loads the sensor, maintenance, and failure tables from CSV, normalizes
//! their column names, and bundles them into a read-only [`Datasets`]
//! context that query handlers borrow.

mod error;
mod loader;
mod missing;
mod records;
mod table;
mod timestamp;

pub use error::DatasetError;
pub use loader::{load_table, normalize_column, read_table};
pub use missing::{is_missing, na_float, NA_TOKENS};
pub use records::{FailureRecord, MaintenanceRecord, Record, SensorReading, TableKind};
pub use table::{Table, TableSummary};
pub use timestamp::Timestamp;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Where each source table lives on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub sensor: PathBuf,
    pub maintenance: PathBuf,
    pub failure: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            sensor: PathBuf::from("sensor_data.csv"),
            maintenance: PathBuf::from("maintenance_logs.csv"),
            failure: PathBuf::from("failure_records.csv"),
        }
    }
}

/// The three tables of one session
///
/// Loaded once, never mutated afterwards. Wrap in an `Arc` to share across
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub sensor: Table<SensorReading>,
    pub maintenance: Table<MaintenanceRecord>,
    pub failure: Table<FailureRecord>,
}

impl Datasets {
    /// Bundle already-loaded tables
    pub fn new(
        sensor: Table<SensorReading>,
        maintenance: Table<MaintenanceRecord>,
        failure: Table<FailureRecord>,
    ) -> Self {
        Self {
            sensor,
            maintenance,
            failure,
        }
    }

    /// Load all three tables, stopping at the first one that is unavailable
    pub async fn load(paths: &DatasetPaths) -> Result<Self, DatasetError> {
        let sensor = load_table(&paths.sensor).await?;
        let maintenance = load_table(&paths.maintenance).await?;
        let failure = load_table(&paths.failure).await?;

        info!(
            "Datasets ready: {} sensor, {} maintenance, {} failure rows",
            sensor.len(),
            maintenance.len(),
            failure.len()
        );
        Ok(Self::new(sensor, maintenance, failure))
    }

    /// Shape overview of every table, in load order
    pub fn summary(&self) -> Vec<TableSummary> {
        vec![
            self.sensor.summary(),
            self.maintenance.summary(),
            self.failure.summary(),
        ]
    }
}

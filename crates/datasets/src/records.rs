//! Row Types for the Three Source Tables
//!
//! Field names are the canonical lowercase column names. Headers are
//! normalized before deserialization, so `Machine_ID` in a file still
//! lands in `machine_id`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

use crate::missing::na_float;
use crate::Timestamp;

/// Which source table a row or error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Continuous sensor readings
    Sensor,
    /// Maintenance task logs
    Maintenance,
    /// Failure records
    Failure,
}

impl TableKind {
    /// All tables, in load order
    pub const ALL: [TableKind; 3] = [TableKind::Sensor, TableKind::Maintenance, TableKind::Failure];

    /// Short name used in URLs, logs and messages
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Sensor => "sensor",
            TableKind::Maintenance => "maintenance",
            TableKind::Failure => "failure",
        }
    }

    /// Columns the query router reads from this table
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Sensor => &["timestamp", "vibration", "temperature", "humidity"],
            TableKind::Maintenance => &["machine_id", "maintenance_date", "task"],
            TableKind::Failure => &[
                "machine_id",
                "failure_date",
                "failure_type",
                "failure_description",
            ],
        }
    }

    /// Look up a table by its short name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row type loadable from one of the source tables
pub trait Record: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    /// Table this row type is read from
    const KIND: TableKind;
}

/// One sensor observation
///
/// Numeric cells are optional: a blank or NA-token cell is a missing
/// observation and is skipped by aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: Timestamp,
    /// Vibration (g)
    #[serde(deserialize_with = "na_float")]
    pub vibration: Option<f64>,
    /// Temperature (°C)
    #[serde(deserialize_with = "na_float")]
    pub temperature: Option<f64>,
    /// Relative humidity (%)
    #[serde(deserialize_with = "na_float")]
    pub humidity: Option<f64>,
}

impl Record for SensorReading {
    const KIND: TableKind = TableKind::Sensor;
}

/// One logged maintenance task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub machine_id: String,
    pub maintenance_date: Timestamp,
    pub task: String,
}

impl Record for MaintenanceRecord {
    const KIND: TableKind = TableKind::Maintenance;
}

/// One recorded machine failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    pub machine_id: String,
    pub failure_date: Timestamp,
    pub failure_type: String,
    pub failure_description: String,
}

impl Record for FailureRecord {
    const KIND: TableKind = TableKind::Failure;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_round_trip() {
        for kind in TableKind::ALL {
            assert_eq!(TableKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(TableKind::from_name("weather"), None);
    }

    #[test]
    fn test_required_columns_are_lowercase() {
        for kind in TableKind::ALL {
            for column in kind.required_columns() {
                assert_eq!(*column, column.to_lowercase());
            }
        }
    }
}

//! Query Routing and Answer Formatting

use datasets::{Datasets, TableKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{latest, mean, most_recent, span};
use crate::{Intent, QueryError};

/// Answer for queries that match no keyword family
pub const FALLBACK_RESPONSE: &str = "Sorry, I didn't understand the query. \
     Try asking about failures, vibration, temperature, or maintenance.";

/// Answer when no failure is typed as a sensor problem
pub const NO_SENSOR_FAULTS: &str = "No sensor-related faults found in the records.";

/// Warning shown instead of routing blank input
pub const BLANK_QUERY_WARNING: &str = "Please enter a query before submitting.";

/// Maximum rows listed for recent failures
pub const RECENT_FAILURE_LIMIT: usize = 5;

/// How a query was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// A handler produced an answer
    Answered,
    /// The matching aggregate had no rows to work with
    NoData,
    /// No keyword family matched
    Unrecognized,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::Answered => "answered",
            ResponseStatus::NoData => "no_data",
            ResponseStatus::Unrecognized => "unrecognized",
        }
    }
}

/// Display-ready answer to one query
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub intent: Intent,
    pub status: ResponseStatus,
    pub text: String,
}

/// Answer a query with display text; never fails
pub fn respond(query: &str, data: &Datasets) -> String {
    answer(query, data).text
}

/// Answer a query, converting empty-table conditions into an apology
pub fn answer(query: &str, data: &Datasets) -> Response {
    let intent = Intent::classify(query);
    debug!("Routing query {:?} to {}", query, intent);

    match dispatch(intent, data) {
        Ok(text) => Response {
            intent,
            status: if intent == Intent::Unrecognized {
                ResponseStatus::Unrecognized
            } else {
                ResponseStatus::Answered
            },
            text,
        },
        Err(err) => {
            warn!("No data for {} query: {}", intent, err);
            Response {
                intent,
                status: ResponseStatus::NoData,
                text: format!("No data available for this query: {}.", err),
            }
        }
    }
}

/// Answer a query, surfacing empty-table conditions as errors
pub fn try_respond(query: &str, data: &Datasets) -> Result<String, QueryError> {
    dispatch(Intent::classify(query), data)
}

fn dispatch(intent: Intent, data: &Datasets) -> Result<String, QueryError> {
    match intent {
        Intent::MostRecentMaintenance => latest_maintenance(data),
        Intent::AverageVibration => sensor_mean(data, "vibration", |r| r.vibration)
            .map(|avg| format!("Average vibration across all machines is {:.2} g.", avg)),
        Intent::AverageTemperature => sensor_mean(data, "temperature", |r| r.temperature)
            .map(|avg| format!("Average temperature across all machines is {:.2}°C.", avg)),
        Intent::AverageHumidity => sensor_mean(data, "humidity", |r| r.humidity)
            .map(|avg| format!("Average humidity across all machines is {:.2}%.", avg)),
        Intent::SensorFaults => Ok(sensor_faults(data)),
        Intent::RecentFailures => Ok(recent_failures(data)),
        Intent::TimeRange => sensor_time_range(data),
        Intent::Unrecognized => Ok(FALLBACK_RESPONSE.to_string()),
    }
}

fn latest_maintenance(data: &Datasets) -> Result<String, QueryError> {
    let row = latest(data.maintenance.rows(), |r| &r.maintenance_date).ok_or(
        QueryError::EmptyTable {
            table: TableKind::Maintenance,
            column: "maintenance_date",
        },
    )?;

    Ok(format!(
        "Latest maintenance: {} on {} for Machine {}.",
        row.task, row.maintenance_date, row.machine_id
    ))
}

fn sensor_mean(
    data: &Datasets,
    column: &'static str,
    value: fn(&datasets::SensorReading) -> Option<f64>,
) -> Result<f64, QueryError> {
    mean(data.sensor.rows().iter().map(value)).ok_or(QueryError::EmptyTable {
        table: TableKind::Sensor,
        column,
    })
}

fn sensor_faults(data: &Datasets) -> String {
    let lines: Vec<String> = data
        .failure
        .rows()
        .iter()
        .filter(|r| r.failure_type.to_lowercase().contains("sensor"))
        .map(|r| {
            format!(
                "Machine {} had a sensor fault on {}: {}",
                r.machine_id, r.failure_date, r.failure_description
            )
        })
        .collect();

    if lines.is_empty() {
        NO_SENSOR_FAULTS.to_string()
    } else {
        lines.join("\n")
    }
}

// An empty failure table yields an empty answer, not a sentence.
fn recent_failures(data: &Datasets) -> String {
    most_recent(data.failure.rows(), RECENT_FAILURE_LIMIT, |r| &r.failure_date)
        .into_iter()
        .map(|r| {
            format!(
                "Machine {} failed on {} with {}: {}",
                r.machine_id, r.failure_date, r.failure_type, r.failure_description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn sensor_time_range(data: &Datasets) -> Result<String, QueryError> {
    let timestamps = data
        .sensor
        .rows()
        .iter()
        .map(|r| &r.timestamp)
        .filter(|ts| !ts.is_missing());
    let (first, last) = span(timestamps).ok_or(
        QueryError::EmptyTable {
            table: TableKind::Sensor,
            column: "timestamp",
        },
    )?;

    Ok(format!(
        "The sensor data covers the period from {} to {}.",
        first, last
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasets::{FailureRecord, MaintenanceRecord, SensorReading, Table};

    fn reading(timestamp: &str, vibration: f64, temperature: f64, humidity: f64) -> SensorReading {
        SensorReading {
            timestamp: timestamp.into(),
            vibration: Some(vibration),
            temperature: Some(temperature),
            humidity: Some(humidity),
        }
    }

    fn maintenance(machine_id: &str, date: &str, task: &str) -> MaintenanceRecord {
        MaintenanceRecord {
            machine_id: machine_id.to_string(),
            maintenance_date: date.into(),
            task: task.to_string(),
        }
    }

    fn failure(machine_id: &str, date: &str, kind: &str, description: &str) -> FailureRecord {
        FailureRecord {
            machine_id: machine_id.to_string(),
            failure_date: date.into(),
            failure_type: kind.to_string(),
            failure_description: description.to_string(),
        }
    }

    fn sample() -> Datasets {
        Datasets::new(
            Table::from_rows(vec![
                reading("2024-01-02 00:00:00", 5.0, 40.0, 60.0),
                reading("2024-01-01 00:00:00", 6.0, 44.5, 65.0),
                reading("2024-01-03 12:30:00", 5.5, 41.0, 61.0),
            ]),
            Table::from_rows(vec![
                maintenance("M2", "2024-02-10", "Coolant flush"),
                maintenance("M7", "2024-03-15", "Spindle alignment"),
                maintenance("M1", "2024-01-20", "Belt replacement"),
            ]),
            Table::from_rows(vec![
                failure("M1", "2024-01-05", "Overheating", "Spindle overheated"),
                failure("M3", "2024-02-11", "Sensor Fault", "Vibration sensor offline"),
                failure("M4", "2024-03-01", "Tool Wear", "Cutter chipped"),
            ]),
        )
    }

    #[test]
    fn test_latest_maintenance_ignores_row_order() {
        let mut data = sample();
        assert_eq!(
            respond("show maintenance", &data),
            "Latest maintenance: Spindle alignment on 2024-03-15 for Machine M7."
        );

        let mut rows = data.maintenance.rows().to_vec();
        rows.reverse();
        data.maintenance = Table::from_rows(rows);
        assert!(respond("Maintenance?", &data).starts_with("Latest maintenance: Spindle alignment"));
    }

    #[test]
    fn test_average_vibration_two_decimals() {
        let data = Datasets::new(
            Table::from_rows(vec![
                reading("2024-01-01", 5.0, 0.0, 0.0),
                reading("2024-01-02", 6.0, 0.0, 0.0),
            ]),
            Table::default(),
            Table::default(),
        );
        assert_eq!(
            respond("average vibration", &data),
            "Average vibration across all machines is 5.50 g."
        );
    }

    #[test]
    fn test_temperature_and_humidity() {
        let data = sample();
        assert_eq!(
            respond("temperature", &data),
            "Average temperature across all machines is 41.83°C."
        );
        assert_eq!(
            respond("humidity", &data),
            "Average humidity across all machines is 62.00%."
        );
    }

    #[test]
    fn test_missing_observations_are_skipped() {
        let mut sparse = reading("2024-01-04", 0.0, 0.0, 0.0);
        sparse.vibration = None;
        let data = Datasets::new(
            Table::from_rows(vec![reading("2024-01-01", 4.0, 0.0, 0.0), sparse]),
            Table::default(),
            Table::default(),
        );
        assert_eq!(
            respond("vibration", &data),
            "Average vibration across all machines is 4.00 g."
        );
    }

    #[test]
    fn test_sensor_faults_case_insensitive() {
        let data = sample();
        assert_eq!(
            respond("Any SENSOR ERROR?", &data),
            "Machine M3 had a sensor fault on 2024-02-11: Vibration sensor offline"
        );
    }

    #[test]
    fn test_sensor_faults_one_line_per_match() {
        let mut data = sample();
        let mut rows = data.failure.rows().to_vec();
        rows.push(failure("M9", "2024-04-01", "sensor drift", "Thermocouple drift"));
        data.failure = Table::from_rows(rows);

        let lines: Vec<String> = respond("sensor fault", &data)
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("Machine M9 had a sensor fault on 2024-04-01"));
    }

    #[test]
    fn test_no_sensor_faults_sentence() {
        let data = Datasets::default();
        assert_eq!(respond("sensor fault", &data), NO_SENSOR_FAULTS);
    }

    #[test]
    fn test_sensor_failure_lists_recent_failures() {
        let data = sample();
        let text = respond("any sensor failure today", &data);
        assert_eq!(
            text.lines().next(),
            Some("Machine M4 failed on 2024-03-01 with Tool Wear: Cutter chipped")
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_recent_failures_capped_at_five() {
        let rows = (1..=8)
            .map(|day| failure("M1", &format!("2024-05-{:02}", day), "Jam", "Chip jam"))
            .collect();
        let data = Datasets::new(Table::default(), Table::default(), Table::from_rows(rows));

        let text = respond("failure", &data);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), RECENT_FAILURE_LIMIT);
        assert!(lines[0].contains("2024-05-08"));
        assert!(lines[4].contains("2024-05-04"));
    }

    #[test]
    fn test_recent_failures_empty_table_is_empty_string() {
        let data = Datasets::default();
        assert_eq!(respond("failure", &data), "");
        assert_eq!(answer("failure", &data).status, ResponseStatus::Answered);
    }

    #[test]
    fn test_time_range() {
        let data = sample();
        assert_eq!(
            respond("what time period is covered", &data),
            "The sensor data covers the period from 2024-01-01 00:00:00 to 2024-01-03 12:30:00."
        );
    }

    #[test]
    fn test_time_range_skips_blank_timestamps() {
        let data = Datasets::new(
            Table::from_rows(vec![
                reading("", 5.0, 40.0, 60.0),
                reading("2024-01-02", 5.0, 40.0, 60.0),
                reading("NA", 5.0, 40.0, 60.0),
                reading("2024-01-03", 5.0, 40.0, 60.0),
            ]),
            Table::default(),
            Table::default(),
        );
        assert_eq!(
            respond("date range", &data),
            "The sensor data covers the period from 2024-01-02 to 2024-01-03."
        );
    }

    #[test]
    fn test_time_range_all_blank_is_empty_table() {
        let data = Datasets::new(
            Table::from_rows(vec![reading("", 5.0, 40.0, 60.0), reading(" ", 5.0, 40.0, 60.0)]),
            Table::default(),
            Table::default(),
        );
        assert_eq!(
            try_respond("range", &data),
            Err(QueryError::EmptyTable {
                table: TableKind::Sensor,
                column: "timestamp",
            })
        );
    }

    #[test]
    fn test_nan_cells_do_not_poison_average() {
        let mut first = reading("2024-01-01", 0.0, 40.0, 60.0);
        first.vibration = Some(f64::NAN);
        let data = Datasets::new(
            Table::from_rows(vec![first, reading("2024-01-02", 5.0, 41.0, 61.0)]),
            Table::default(),
            Table::default(),
        );
        let text = respond("vibration", &data);
        assert_eq!(text, "Average vibration across all machines is 5.00 g.");
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_priority_maintenance_over_failure() {
        let data = sample();
        assert!(respond("maintenance failure report", &data).starts_with("Latest maintenance:"));
    }

    #[test]
    fn test_unrecognized_is_fixed_and_stateless() {
        let data = sample();
        for _ in 0..3 {
            assert_eq!(respond("what is the weather", &data), FALLBACK_RESPONSE);
        }
        let reply = answer("what is the weather", &data);
        assert_eq!(reply.intent, Intent::Unrecognized);
        assert_eq!(reply.status, ResponseStatus::Unrecognized);
    }

    #[test]
    fn test_empty_tables_are_typed_errors() {
        let data = Datasets::default();
        let cases = [
            ("maintenance", TableKind::Maintenance, "maintenance_date"),
            ("vibration", TableKind::Sensor, "vibration"),
            ("temperature", TableKind::Sensor, "temperature"),
            ("humidity", TableKind::Sensor, "humidity"),
            ("range", TableKind::Sensor, "timestamp"),
        ];

        for (query, table, column) in cases {
            assert_eq!(
                try_respond(query, &data),
                Err(QueryError::EmptyTable { table, column })
            );
        }
    }

    #[test]
    fn test_empty_table_becomes_apology() {
        let data = Datasets::default();
        let reply = answer("average vibration", &data);
        assert_eq!(reply.status, ResponseStatus::NoData);
        assert_eq!(
            reply.text,
            "No data available for this query: the sensor table has no vibration values."
        );
        assert!(!reply.text.contains("NaN"));
    }
}

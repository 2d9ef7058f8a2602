//! Intent Classification
//!
//! Literal substring matching over the lowercased query. Keyword families
//! overlap, so the order of [`INTENT_KEYWORDS`] decides the outcome.

use serde::Serialize;
use std::fmt;

/// What a query is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MostRecentMaintenance,
    AverageVibration,
    AverageTemperature,
    AverageHumidity,
    SensorFaults,
    RecentFailures,
    TimeRange,
    Unrecognized,
}

/// Keyword families in priority order; first match wins
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::MostRecentMaintenance, &["maintenance"]),
    (Intent::AverageVibration, &["vibration"]),
    (Intent::AverageTemperature, &["temperature"]),
    (Intent::AverageHumidity, &["humidity"]),
    (Intent::SensorFaults, &["sensor fault", "sensor error"]),
    (Intent::RecentFailures, &["failure"]),
    (Intent::TimeRange, &["range", "time period"]),
];

impl Intent {
    /// Classify a raw query
    pub fn classify(query: &str) -> Intent {
        let query = query.to_lowercase();
        INTENT_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| query.contains(k)))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::Unrecognized)
    }

    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MostRecentMaintenance => "most_recent_maintenance",
            Intent::AverageVibration => "average_vibration",
            Intent::AverageTemperature => "average_temperature",
            Intent::AverageHumidity => "average_humidity",
            Intent::SensorFaults => "sensor_faults",
            Intent::RecentFailures => "recent_failures",
            Intent::TimeRange => "time_range",
            Intent::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

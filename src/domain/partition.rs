// src/domain/partition.rs

use std::fmt;

/// Extension of the per-partition source files.
pub const SOURCE_EXTENSION: &str = "csv";

/// A (city, period) pair that has been checked against the dashboard config.
///
/// Only `DashboardConfig::partition` and `DashboardConfig::partitions` hand these
/// out, so holding one means the pair is known to be valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    city: String,
    period: String,
}

impl Partition {
    pub(crate) fn new(city: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            period: period.into(),
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn period(&self) -> &str {
        &self.period
    }

    /// `berlin` + `weekday` -> `berlin_weekdays.csv`
    pub fn source_file_name(&self) -> String {
        format!("{}_{}s.{}", self.city, self.period, SOURCE_EXTENSION)
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.city, self.period)
    }
}

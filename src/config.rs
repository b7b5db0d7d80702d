// src/config.rs

use crate::domain::Partition;
use crate::errors::ServerError;

pub const DEFAULT_CITIES: [&str; 10] = [
    "amsterdam",
    "athens",
    "barcelona",
    "berlin",
    "budapest",
    "lisbon",
    "london",
    "paris",
    "rome",
    "vienna",
];

pub const DEFAULT_PERIODS: [&str; 2] = ["weekday", "weekend"];

/// The cities and periods the dashboard knows about. Built once at startup
/// and shared by the importer and the query side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    cities: Vec<String>,
    periods: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES, DEFAULT_PERIODS)
    }
}

impl DashboardConfig {
    pub fn new<C, P>(cities: C, periods: P) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            cities: cities.into_iter().map(Into::into).collect(),
            periods: periods.into_iter().map(Into::into).collect(),
        }
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// Validate a raw (city, period) pair. Matching is exact: no trimming,
    /// no case folding.
    pub fn partition(&self, city: &str, period: &str) -> Result<Partition, ServerError> {
        if !self.cities.iter().any(|c| c == city) {
            return Err(ServerError::BadRequest(format!(
                "Unknown city '{}'",
                truncate(city)
            )));
        }
        if !self.periods.iter().any(|p| p == period) {
            return Err(ServerError::BadRequest(format!(
                "Unknown period '{}', expected one of: {}",
                truncate(period),
                self.periods.join(", ")
            )));
        }
        Ok(Partition::new(city, period))
    }

    /// Every city x period combination, cities outermost.
    pub fn partitions(&self) -> impl Iterator<Item = Partition> + '_ {
        self.cities.iter().flat_map(move |city| {
            self.periods
                .iter()
                .map(move |period| Partition::new(city.as_str(), period.as_str()))
        })
    }
}

// Keep echoed input short in error messages.
fn truncate(raw: &str) -> String {
    const MAX: usize = 40;
    if raw.chars().count() <= MAX {
        raw.to_string()
    } else {
        let head: String = raw.chars().take(MAX).collect();
        format!("{head}...")
    }
}

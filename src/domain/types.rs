//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory across the request/response pipeline
//! - rendered by both the CLI report and the TUI widgets

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// One of the two independently forecast consumption categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    Industrial,
    Commercial,
}

impl Sector {
    pub const ALL: [Sector; 2] = [Sector::Industrial, Sector::Commercial];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Sector::Industrial => "Industrial",
            Sector::Commercial => "Commercial",
        }
    }

    /// Consumption column header in the historical CSV for this sector.
    pub fn consumption_column(self) -> &'static str {
        match self {
            Sector::Industrial => "Total Energy Consumed by the Industrial Sector, Monthly",
            Sector::Commercial => "Total Energy Consumed by the Commercial Sector, Monthly",
        }
    }
}

/// English month names indexed by `month - 1`.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name for a 1-based month number; falls back to the raw number when out of
/// range (selector code keeps months in 1..=12, so this is belt-only).
pub fn month_name(month: u32) -> String {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| month.to_string())
}

/// The user's four selector choices: an inclusive calendar-month range
/// [first day of start month, last day of end month].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

impl DateRange {
    fn start_index(&self) -> i64 {
        self.start_year as i64 * 12 + self.start_month as i64
    }

    fn end_index(&self) -> i64 {
        self.end_year as i64 * 12 + self.end_month as i64
    }

    /// True when the end month precedes the start month.
    pub fn is_inverted(&self) -> bool {
        self.end_index() < self.start_index()
    }

    /// Number of calendar months covered (inclusive); 0 for an inverted range.
    pub fn month_count(&self) -> usize {
        (self.end_index() - self.start_index() + 1).max(0) as usize
    }

    /// Short label for status lines, e.g. "March 2023 – May 2023".
    pub fn label(&self) -> String {
        format!(
            "{} {} – {} {}",
            month_name(self.start_month),
            self.start_year,
            month_name(self.end_month),
            self.end_year,
        )
    }
}

/// One historical observation: month and consumption value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub consumption: f64,
}

/// A 95% prediction interval returned by the scoring service.
///
/// The service renders intervals either as a two-element numeric array or as
/// the string `"[lo, hi]"`; both wire forms deserialize into this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl<'de> Deserialize<'de> for Interval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Pair([f64; 2]),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Pair([lower, upper]) => Ok(Interval { lower, upper }),
            Wire::Text(s) => parse_interval_text(&s)
                .ok_or_else(|| D::Error::custom(format!("invalid prediction interval '{s}'"))),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.lower, self.upper)
    }
}

fn parse_interval_text(s: &str) -> Option<Interval> {
    let inner = s
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);
    let mut parts = inner.split(',');
    let lower = parts.next()?.trim().parse::<f64>().ok()?;
    let upper = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Interval { lower, upper })
}

/// One sector's parsed forecast, positionally aligned with the request dates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorForecast {
    pub forecast: Vec<f64>,
    pub intervals: Vec<Interval>,
}

/// One row of the combined output table: a requested month with both sectors'
/// forecast and interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRow {
    /// First day of the forecast month.
    pub month: NaiveDate,
    pub industrial: f64,
    pub industrial_interval: Interval,
    pub commercial: f64,
    pub commercial_interval: Interval,
}

impl ForecastRow {
    /// Long-form label, e.g. "March 2023".
    pub fn label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_count_inclusive() {
        let range = DateRange {
            start_year: 2023,
            start_month: 3,
            end_year: 2023,
            end_month: 5,
        };
        assert!(!range.is_inverted());
        assert_eq!(range.month_count(), 3);
    }

    #[test]
    fn month_count_across_year_boundary() {
        let range = DateRange {
            start_year: 2022,
            start_month: 11,
            end_year: 2023,
            end_month: 2,
        };
        assert_eq!(range.month_count(), 4);
    }

    #[test]
    fn inverted_range_detected() {
        let range = DateRange {
            start_year: 2023,
            start_month: 6,
            end_year: 2023,
            end_month: 2,
        };
        assert!(range.is_inverted());
        assert_eq!(range.month_count(), 0);
    }

    #[test]
    fn interval_deserializes_from_pair_and_text() {
        let a: Interval = serde_json::from_str("[1.5, 2.5]").unwrap();
        assert_eq!(a, Interval { lower: 1.5, upper: 2.5 });

        let b: Interval = serde_json::from_str("\"[1.5, 2.5]\"").unwrap();
        assert_eq!(b, a);

        let bad: Result<Interval, _> = serde_json::from_str("\"not an interval\"");
        assert!(bad.is_err());
    }

    #[test]
    fn row_label_is_long_form() {
        let row = ForecastRow {
            month: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            industrial: 1.0,
            industrial_interval: Interval { lower: 0.5, upper: 1.5 },
            commercial: 2.0,
            commercial_interval: Interval { lower: 1.5, upper: 2.5 },
        };
        assert_eq!(row.label(), "March 2023");
    }

    #[test]
    fn month_name_lookup() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "13");
    }
}

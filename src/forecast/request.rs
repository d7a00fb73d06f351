//! Date-range expansion and scoring payload construction.
//!
//! The scoring service expects one timestamp per forecast month, formatted as
//! UTC ISO-8601 with zero time-of-day and millisecond precision, wrapped in
//! the AutoML envelope:
//!
//! ```json
//! {"Inputs": {"data": [{"Date": "2023-03-01T00:00:00.000Z"}, ...]},
//!  "GlobalParameters": {"quantiles": [0.025, 0.975]}}
//! ```
//!
//! Both sectors receive the identical payload; only the endpoint differs.

use chrono::{Days, Months, NaiveDate};
use serde::Serialize;

use crate::domain::{month_name, DateRange};
use crate::error::AppError;

/// The request body sent to each scoring endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ScorePayload {
    #[serde(rename = "Inputs")]
    pub inputs: Inputs,
    #[serde(rename = "GlobalParameters")]
    pub global_parameters: GlobalParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct Inputs {
    pub data: Vec<DateEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateEntry {
    #[serde(rename = "Date")]
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalParameters {
    pub quantiles: [f64; 2],
}

/// Expand a calendar-month range into the first day of every covered month.
///
/// The range nominally ends on the last calendar day of the end month
/// (leap-year aware), but the generating step lands on month starts, so the
/// final emitted date is the first of the end month. An inverted range is an
/// input error.
pub fn month_starts(range: &DateRange) -> Result<Vec<NaiveDate>, AppError> {
    let start = NaiveDate::from_ymd_opt(range.start_year, range.start_month, 1).ok_or_else(
        || {
            AppError::input(format!(
                "invalid start month {}-{:02}",
                range.start_year, range.start_month
            ))
        },
    )?;
    let end_month_first = NaiveDate::from_ymd_opt(range.end_year, range.end_month, 1)
        .ok_or_else(|| {
            AppError::input(format!(
                "invalid end month {}-{:02}",
                range.end_year, range.end_month
            ))
        })?;

    let end = last_day_of_month(end_month_first);
    if start > end {
        return Err(AppError::input(format!(
            "start {} {} is after end {} {}; pick an end month on or after the start",
            month_name(range.start_month),
            range.start_year,
            month_name(range.end_month),
            range.end_year,
        )));
    }

    let mut out = Vec::with_capacity(range.month_count());
    let mut current = start;
    while current <= end {
        out.push(current);
        current = current + Months::new(1);
    }

    Ok(out)
}

/// Last calendar day of the month containing `first` (which must be a month
/// start). Accounts for month length and leap years.
pub fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    (first + Months::new(1))
        .checked_sub_days(Days::new(1))
        .unwrap_or(first)
}

/// Format a month start as `YYYY-MM-DDT00:00:00.000Z`.
pub fn format_timestamp(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Wrap the month starts and quantile pair into the scoring payload.
pub fn build_payload(dates: &[NaiveDate], quantiles: [f64; 2]) -> ScorePayload {
    ScorePayload {
        inputs: Inputs {
            data: dates
                .iter()
                .map(|d| DateEntry {
                    date: format_timestamp(*d),
                })
                .collect(),
        },
        global_parameters: GlobalParameters { quantiles },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QUANTILES;
    use crate::error::ErrorKind;
    use chrono::{Datelike, NaiveDateTime};
    use serde_json::json;

    fn range(sy: i32, sm: u32, ey: i32, em: u32) -> DateRange {
        DateRange {
            start_year: sy,
            start_month: sm,
            end_year: ey,
            end_month: em,
        }
    }

    #[test]
    fn three_month_example() {
        let dates = month_starts(&range(2023, 3, 2023, 5)).unwrap();
        let formatted: Vec<String> = dates.iter().map(|d| format_timestamp(*d)).collect();
        assert_eq!(
            formatted,
            vec![
                "2023-03-01T00:00:00.000Z",
                "2023-04-01T00:00:00.000Z",
                "2023-05-01T00:00:00.000Z",
            ]
        );
    }

    #[test]
    fn length_matches_inclusive_month_count() {
        let cases = [
            range(2023, 1, 2023, 1),
            range(2023, 1, 2023, 12),
            range(2020, 11, 2022, 2),
            range(1999, 12, 2000, 1),
        ];
        for r in cases {
            let dates = month_starts(&r).unwrap();
            let expected = (r.end_year as i64 * 12 + r.end_month as i64)
                - (r.start_year as i64 * 12 + r.start_month as i64)
                + 1;
            assert_eq!(dates.len() as i64, expected, "range {r:?}");
            // Each element is a first-of-month, stepping one month at a time.
            for pair in dates.windows(2) {
                assert_eq!(pair[0].day(), 1);
                assert_eq!(pair[0] + Months::new(1), pair[1]);
            }
            assert_eq!(dates.last().unwrap().day(), 1);
        }
    }

    #[test]
    fn inverted_range_is_an_input_error() {
        let err = month_starts(&range(2023, 6, 2023, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.to_string().contains("June 2023"));
        assert!(err.to_string().contains("February 2023"));
    }

    #[test]
    fn leap_year_end_month() {
        let first = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert_eq!(
            last_day_of_month(first),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );

        let first = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        assert_eq!(
            last_day_of_month(first),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }

    #[test]
    fn timestamp_round_trips() {
        let date = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let formatted = format_timestamp(date);
        let parsed =
            NaiveDateTime::parse_from_str(&formatted, "%Y-%m-%dT%H:%M:%S%.3fZ").unwrap();
        assert_eq!(parsed.date(), date);
        assert_eq!(parsed.time(), chrono::NaiveTime::MIN);
    }

    #[test]
    fn payload_matches_wire_shape() {
        let dates = month_starts(&range(2023, 3, 2023, 4)).unwrap();
        let payload = build_payload(&dates, QUANTILES);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "Inputs": {
                    "data": [
                        {"Date": "2023-03-01T00:00:00.000Z"},
                        {"Date": "2023-04-01T00:00:00.000Z"},
                    ]
                },
                "GlobalParameters": {
                    "quantiles": [0.025, 0.975]
                }
            })
        );
    }
}

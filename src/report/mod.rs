//! Reporting utilities: combined forecast rows and formatted terminal output.

use chrono::NaiveDate;

use crate::domain::{ForecastRow, SectorForecast};
use crate::error::AppError;
use crate::forecast::ForecastPair;

mod format;

pub use format::*;

/// Zip the requested months with both sectors' forecasts into table rows.
///
/// The client has already validated lengths against the request, so a
/// mismatch here means a caller bug; it is still reported rather than
/// silently truncated.
pub fn build_rows(dates: &[NaiveDate], pair: &ForecastPair) -> Result<Vec<ForecastRow>, AppError> {
    ensure_aligned(dates.len(), &pair.industrial)?;
    ensure_aligned(dates.len(), &pair.commercial)?;

    let mut rows = Vec::with_capacity(dates.len());
    for (i, &month) in dates.iter().enumerate() {
        rows.push(ForecastRow {
            month,
            industrial: pair.industrial.forecast[i],
            industrial_interval: pair.industrial.intervals[i],
            commercial: pair.commercial.forecast[i],
            commercial_interval: pair.commercial.intervals[i],
        });
    }

    Ok(rows)
}

fn ensure_aligned(expected: usize, forecast: &SectorForecast) -> Result<(), AppError> {
    if forecast.forecast.len() != expected || forecast.intervals.len() != expected {
        return Err(AppError::format(format!(
            "forecast series misaligned with request: expected {expected}, got {} forecasts and {} intervals",
            forecast.forecast.len(),
            forecast.intervals.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use crate::error::ErrorKind;

    fn sector(values: &[f64]) -> SectorForecast {
        SectorForecast {
            forecast: values.to_vec(),
            intervals: values
                .iter()
                .map(|v| Interval {
                    lower: v - 10.0,
                    upper: v + 10.0,
                })
                .collect(),
        }
    }

    fn months(ym: &[(i32, u32)]) -> Vec<NaiveDate> {
        ym.iter()
            .map(|&(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap())
            .collect()
    }

    #[test]
    fn one_row_per_requested_month() {
        let dates = months(&[(2023, 3), (2023, 4), (2023, 5)]);
        let pair = ForecastPair {
            industrial: sector(&[1.0, 2.0, 3.0]),
            commercial: sector(&[4.0, 5.0, 6.0]),
        };

        let rows = build_rows(&dates, &pair).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label(), "March 2023");
        assert_eq!(rows[2].label(), "May 2023");
        assert_eq!(rows[1].industrial, 2.0);
        assert_eq!(rows[1].commercial, 5.0);
        assert_eq!(rows[1].commercial_interval.upper, 15.0);
    }

    #[test]
    fn misaligned_pair_is_rejected() {
        let dates = months(&[(2023, 3), (2023, 4)]);
        let pair = ForecastPair {
            industrial: sector(&[1.0]),
            commercial: sector(&[4.0, 5.0]),
        };
        let err = build_rows(&dates, &pair).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

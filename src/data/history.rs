//! Historical consumption data loaded from the two published CSV resources.
//!
//! Loading happens once at startup. A failed load for either sector is
//! recorded and reported, but never fatal: the selectors and Predict stay
//! usable, only that sector's historical overlay goes missing.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Utc};
use reqwest::blocking::Client;

use crate::config::AppConfig;
use crate::domain::{HistoryPoint, Sector};
use crate::error::AppError;

/// First year offered by the selectors when no historical data could be
/// loaded at all.
const FALLBACK_FIRST_YEAR: i32 = 1990;

/// One sector's dated consumption series, sorted ascending by date.
#[derive(Debug, Clone)]
pub struct SectorHistory {
    pub sector: Sector,
    pub points: Vec<HistoryPoint>,
}

/// Both sectors' historical series plus any load failures.
///
/// Loaded once, then read-only for the session.
#[derive(Debug, Clone, Default)]
pub struct HistoricalData {
    pub industrial: Option<SectorHistory>,
    pub commercial: Option<SectorHistory>,
    pub load_errors: Vec<String>,
}

impl HistoricalData {
    /// Fetch and parse both sectors' CSVs. Per-sector failures are collected
    /// in `load_errors` rather than propagated.
    pub fn load(client: &Client, config: &AppConfig) -> Self {
        let mut out = Self::default();
        for sector in Sector::ALL {
            match fetch_sector_history(client, config.data_url(sector), sector) {
                Ok(history) => out.set(history),
                Err(err) => out
                    .load_errors
                    .push(format!("{}: {err}", sector.display_name())),
            }
        }
        out
    }

    fn set(&mut self, history: SectorHistory) {
        match history.sector {
            Sector::Industrial => self.industrial = Some(history),
            Sector::Commercial => self.commercial = Some(history),
        }
    }

    pub fn sector(&self, sector: Sector) -> Option<&SectorHistory> {
        match sector {
            Sector::Industrial => self.industrial.as_ref(),
            Sector::Commercial => self.commercial.as_ref(),
        }
    }

    /// Union of years present in either sector's series, newest first.
    ///
    /// When both loads failed, a fixed span ending at the current year keeps
    /// the selectors usable.
    pub fn years(&self) -> Vec<i32> {
        let mut set: BTreeSet<i32> = BTreeSet::new();
        for history in [&self.industrial, &self.commercial].into_iter().flatten() {
            for point in &history.points {
                set.insert(point.date.year());
            }
        }

        if set.is_empty() {
            let current = Utc::now().date_naive().year();
            return (FALLBACK_FIRST_YEAR..=current).rev().collect();
        }

        set.into_iter().rev().collect()
    }
}

fn fetch_sector_history(
    client: &Client,
    url: &str,
    sector: Sector,
) -> Result<SectorHistory, AppError> {
    let resp = client
        .get(url)
        .send()
        .map_err(|e| AppError::history(format!("failed to fetch historical data: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::history(format!(
            "historical data request returned status {}",
            resp.status()
        )));
    }

    let body = resp
        .text()
        .map_err(|e| AppError::history(format!("failed to read historical data body: {e}")))?;

    parse_history_csv(&body, sector)
}

/// Parse one sector's CSV body into a sorted series.
///
/// Requires a `Date` column in `DD-MM-YYYY` format and the sector's
/// consumption column; rows with an unparsable value are an error (the source
/// files are machine-generated, so a bad row means a bad fetch).
pub fn parse_history_csv(body: &str, sector: Sector) -> Result<SectorHistory, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::history(format!("failed to read CSV headers: {e}")))?
        .clone();

    let date_idx = headers
        .iter()
        .position(|h| h == "Date")
        .ok_or_else(|| AppError::history("CSV is missing the 'Date' column"))?;
    let value_idx = headers
        .iter()
        .position(|h| h == sector.consumption_column())
        .ok_or_else(|| {
            AppError::history(format!(
                "CSV is missing the '{}' column",
                sector.consumption_column()
            ))
        })?;

    let mut points = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let line = i + 2; // 1-based, after the header row
        let record =
            record.map_err(|e| AppError::history(format!("CSV line {line}: {e}")))?;

        let raw_date = record
            .get(date_idx)
            .ok_or_else(|| AppError::history(format!("CSV line {line}: missing date field")))?;
        let date = NaiveDate::parse_from_str(raw_date, "%d-%m-%Y").map_err(|e| {
            AppError::history(format!("CSV line {line}: invalid date '{raw_date}': {e}"))
        })?;

        let raw_value = record
            .get(value_idx)
            .ok_or_else(|| AppError::history(format!("CSV line {line}: missing value field")))?;
        let consumption = raw_value.parse::<f64>().map_err(|e| {
            AppError::history(format!("CSV line {line}: invalid value '{raw_value}': {e}"))
        })?;

        points.push(HistoryPoint { date, consumption });
    }

    // The source is expected to be sorted already; sorting here makes the
    // invariant hold regardless.
    points.sort_by_key(|p| p.date);

    Ok(SectorHistory { sector, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // The consumption header itself contains a comma, hence the quoting.
    const INDUSTRIAL_CSV: &str = "\
Date,\"Total Energy Consumed by the Industrial Sector, Monthly\"
01-01-2022,2900.5
01-02-2022,2875.1
01-03-2021,2810.0
";

    #[test]
    fn parses_and_sorts_history() {
        let history = parse_history_csv(INDUSTRIAL_CSV, Sector::Industrial).unwrap();
        assert_eq!(history.points.len(), 3);
        // 2021 row sorts first even though it appears last in the file.
        assert_eq!(
            history.points[0].date,
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()
        );
        assert_eq!(history.points[0].consumption, 2810.0);
        assert_eq!(
            history.points[2].date,
            NaiveDate::from_ymd_opt(2022, 2, 1).unwrap()
        );
    }

    #[test]
    fn missing_column_is_a_history_error() {
        let err = parse_history_csv(INDUSTRIAL_CSV, Sector::Commercial).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::History);
        assert!(err.to_string().contains("Commercial"));
    }

    #[test]
    fn bad_date_is_reported_with_line() {
        let csv = "\
Date,\"Total Energy Consumed by the Industrial Sector, Monthly\"
2022-01-01,2900.5
";
        let err = parse_history_csv(csv, Sector::Industrial).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::History);
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn years_are_union_descending() {
        let industrial = parse_history_csv(INDUSTRIAL_CSV, Sector::Industrial).unwrap();
        let data = HistoricalData {
            industrial: Some(industrial),
            commercial: None,
            load_errors: vec![],
        };
        assert_eq!(data.years(), vec![2022, 2021]);
    }

    #[test]
    fn years_fall_back_when_empty() {
        let data = HistoricalData::default();
        let years = data.years();
        assert!(!years.is_empty());
        // Descending, ending at the fallback floor.
        assert_eq!(*years.last().unwrap(), 1990);
        assert!(years[0] > years[years.len() - 1]);
    }
}

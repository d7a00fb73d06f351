//! Shared "predict pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! range -> month starts -> payload -> two POSTs -> validated parse -> rows
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use chrono::NaiveDate;

use crate::config::{AppConfig, QUANTILES};
use crate::domain::{DateRange, ForecastRow, Sector, SectorForecast};
use crate::error::AppError;
use crate::forecast::{build_payload, month_starts, ForecastClient, ForecastPair};

/// All computed outputs of a single predict action.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// First-of-month dates the forecast was requested for.
    pub dates: Vec<NaiveDate>,
    pub pair: ForecastPair,
    pub rows: Vec<ForecastRow>,
}

impl RunOutput {
    pub fn sector(&self, sector: Sector) -> &SectorForecast {
        match sector {
            Sector::Industrial => &self.pair.industrial,
            Sector::Commercial => &self.pair.commercial,
        }
    }
}

/// Execute the full predict pipeline with a fresh client.
pub fn run_forecast(config: &AppConfig, range: &DateRange) -> Result<RunOutput, AppError> {
    let client = ForecastClient::new(config)?;
    run_forecast_with_client(&client, range)
}

/// Execute the predict pipeline with a pre-built client.
///
/// This is useful for the TUI where one client serves repeated predicts.
pub fn run_forecast_with_client(
    client: &ForecastClient,
    range: &DateRange,
) -> Result<RunOutput, AppError> {
    // 1) Expand the range into month starts (validates inversion).
    let dates = month_starts(range)?;

    // 2) Build the shared payload; both sectors receive identical bodies.
    let payload = build_payload(&dates, QUANTILES);

    // 3) POST to both endpoints, sequentially, and validate the envelopes.
    let pair = client.fetch_both(&payload, dates.len())?;

    // 4) Zip into combined table rows.
    let rows = crate::report::build_rows(&dates, &pair)?;

    Ok(RunOutput { dates, pair, rows })
}

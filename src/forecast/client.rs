//! Blocking client for the two scoring endpoints.
//!
//! One Predict issues two sequential POSTs (industrial first), each with the
//! full timeout budget. Status checking happens only after both calls return,
//! so an error message can always name both sectors' status codes. There is
//! no retry and no partial rendering: any failure is terminal for that
//! Predict.

use reqwest::blocking::Client;
use reqwest::StatusCode;

use serde::Deserialize;

use crate::config::AppConfig;
use crate::domain::{Interval, Sector, SectorForecast};
use crate::error::AppError;
use crate::forecast::request::ScorePayload;

/// Typed response envelope; a body without `Results` fails the parse.
#[derive(Debug, Deserialize)]
struct ScoreResponse {
    #[serde(rename = "Results")]
    results: ResultsEnvelope,
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope {
    forecast: Vec<f64>,
    prediction_interval: Vec<Interval>,
}

/// Both sectors' parsed forecasts for one Predict.
#[derive(Debug, Clone)]
pub struct ForecastPair {
    pub industrial: SectorForecast,
    pub commercial: SectorForecast,
}

pub struct ForecastClient {
    client: Client,
    industrial_endpoint: String,
    commercial_endpoint: String,
}

impl ForecastClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            industrial_endpoint: config.industrial_endpoint.clone(),
            commercial_endpoint: config.commercial_endpoint.clone(),
        })
    }

    /// POST the shared payload to both endpoints and return both parsed
    /// forecasts, validated against the request's month count.
    pub fn fetch_both(
        &self,
        payload: &ScorePayload,
        expected_len: usize,
    ) -> Result<ForecastPair, AppError> {
        let industrial = self.post(Sector::Industrial, payload)?;
        let commercial = self.post(Sector::Commercial, payload)?;

        ensure_success(industrial.status(), commercial.status())?;

        let industrial_body = industrial.text().map_err(|e| {
            AppError::network(format!("failed to read industrial response body: {e}"))
        })?;
        let commercial_body = commercial.text().map_err(|e| {
            AppError::network(format!("failed to read commercial response body: {e}"))
        })?;

        Ok(ForecastPair {
            industrial: parse_score_body(&industrial_body, Sector::Industrial, expected_len)?,
            commercial: parse_score_body(&commercial_body, Sector::Commercial, expected_len)?,
        })
    }

    fn post(
        &self,
        sector: Sector,
        payload: &ScorePayload,
    ) -> Result<reqwest::blocking::Response, AppError> {
        let endpoint = match sector {
            Sector::Industrial => &self.industrial_endpoint,
            Sector::Commercial => &self.commercial_endpoint,
        };

        self.client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .map_err(|e| {
                AppError::network(format!(
                    "failed to connect to the {} endpoint: {e}",
                    sector.display_name().to_lowercase()
                ))
            })
    }
}

/// Require 200 from both endpoints; the error names both status codes.
fn ensure_success(industrial: StatusCode, commercial: StatusCode) -> Result<(), AppError> {
    if industrial.is_success() && commercial.is_success() {
        return Ok(());
    }
    Err(AppError::api(format!(
        "error in API response: Industrial - {}, Commercial - {}",
        industrial.as_u16(),
        commercial.as_u16()
    )))
}

/// Parse one endpoint's body and validate sequence lengths against the
/// request's month count.
pub fn parse_score_body(
    body: &str,
    sector: Sector,
    expected_len: usize,
) -> Result<SectorForecast, AppError> {
    let parsed: ScoreResponse = serde_json::from_str(body).map_err(|e| {
        AppError::format(format!(
            "{} prediction data is not in the expected format: {e}",
            sector.display_name()
        ))
    })?;

    let ResultsEnvelope {
        forecast,
        prediction_interval,
    } = parsed.results;

    if forecast.len() != expected_len || prediction_interval.len() != expected_len {
        return Err(AppError::format(format!(
            "{} response is misaligned: requested {expected_len} months, got {} forecasts and {} intervals",
            sector.display_name(),
            forecast.len(),
            prediction_interval.len()
        )));
    }

    Ok(SectorForecast {
        forecast,
        intervals: prediction_interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const GOOD_BODY: &str = r#"{
        "Results": {
            "forecast": [2900.1, 2875.4],
            "prediction_interval": ["[2700.0, 3100.0]", [2650.0, 3050.0]]
        }
    }"#;

    #[test]
    fn parses_valid_body_with_mixed_interval_forms() {
        let parsed = parse_score_body(GOOD_BODY, Sector::Industrial, 2).unwrap();
        assert_eq!(parsed.forecast, vec![2900.1, 2875.4]);
        assert_eq!(parsed.intervals[0].lower, 2700.0);
        assert_eq!(parsed.intervals[1].upper, 3050.0);
    }

    #[test]
    fn missing_results_is_a_format_error() {
        let err =
            parse_score_body(r#"{"Outputs": []}"#, Sector::Commercial, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("Commercial"));
    }

    #[test]
    fn length_mismatch_is_a_format_error() {
        let err = parse_score_body(GOOD_BODY, Sector::Industrial, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("requested 3 months"));
        assert!(err.to_string().contains("2 forecasts"));
    }

    #[test]
    fn non_200_names_both_status_codes() {
        let err = ensure_success(StatusCode::OK, StatusCode::BAD_GATEWAY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        let message = err.to_string();
        assert!(message.contains("Industrial - 200"));
        assert!(message.contains("Commercial - 502"));

        assert!(ensure_success(StatusCode::OK, StatusCode::OK).is_ok());
    }

    #[test]
    fn malformed_interval_entry_fails_the_parse() {
        let body = r#"{
            "Results": {
                "forecast": [1.0],
                "prediction_interval": ["nope"]
            }
        }"#;
        let err = parse_score_body(body, Sector::Industrial, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

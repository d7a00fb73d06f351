//! Runtime configuration with environment overrides.
//!
//! Every external location has a compiled-in default matching the deployed
//! service, so `ecf` works out of the box. A `.env` file (or real environment
//! variables) can point the client at alternative data files or scoring
//! endpoints, which is how the tests and staging deployments are wired up.

use std::time::Duration;

use crate::domain::Sector;

const DEFAULT_INDUSTRIAL_DATA_URL: &str =
    "https://raw.githubusercontent.com/adarshb3/FP2/main/elec_industrial_github2.csv";
const DEFAULT_COMMERCIAL_DATA_URL: &str =
    "https://raw.githubusercontent.com/adarshb3/FP2/main/elec_commercial_github.csv";

const DEFAULT_INDUSTRIAL_ENDPOINT: &str =
    "http://f3a4ef57-ecd3-4b16-9100-874b20af60a3.eastus.azurecontainer.io/score";
const DEFAULT_COMMERCIAL_ENDPOINT: &str =
    "http://ed5e0b71-9c23-4eeb-829f-d0daad0f4e2c.eastus.azurecontainer.io/score";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Tail probabilities for the 95% prediction interval requested from the
/// scoring service.
pub const QUANTILES: [f64; 2] = [0.025, 0.975];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub industrial_data_url: String,
    pub commercial_data_url: String,
    pub industrial_endpoint: String,
    pub commercial_endpoint: String,
    /// Per-request upper bound on wait time (each sector call gets the full
    /// budget, so the worst case for one Predict is twice this).
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let var = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let timeout_secs = std::env::var("ECF_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            industrial_data_url: var("ECF_INDUSTRIAL_DATA_URL", DEFAULT_INDUSTRIAL_DATA_URL),
            commercial_data_url: var("ECF_COMMERCIAL_DATA_URL", DEFAULT_COMMERCIAL_DATA_URL),
            industrial_endpoint: var("ECF_INDUSTRIAL_ENDPOINT", DEFAULT_INDUSTRIAL_ENDPOINT),
            commercial_endpoint: var("ECF_COMMERCIAL_ENDPOINT", DEFAULT_COMMERCIAL_ENDPOINT),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn data_url(&self, sector: Sector) -> &str {
        match sector {
            Sector::Industrial => &self.industrial_data_url,
            Sector::Commercial => &self.commercial_data_url,
        }
    }

    pub fn endpoint(&self, sector: Sector) -> &str {
        match sector {
            Sector::Industrial => &self.industrial_endpoint,
            Sector::Commercial => &self.commercial_endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_both_sectors() {
        let config = AppConfig::from_env();
        for sector in Sector::ALL {
            assert!(config.data_url(sector).starts_with("http"));
            assert!(config.endpoint(sector).ends_with("/score"));
        }
        assert!(config.timeout >= Duration::from_secs(1));
    }
}

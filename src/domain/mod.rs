//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the two consumption sectors (`Sector`)
//! - the user-selected calendar-month range (`DateRange`)
//! - historical observations (`HistoryPoint`)
//! - forecast outputs (`SectorForecast`, `Interval`, `ForecastRow`)

pub mod types;

pub use types::*;

//! Command-line parsing for the consumption forecast client.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the request/response code.

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ecf",
    version,
    about = "Electricity consumption forecast client (Azure AutoML scoring endpoints)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Request forecasts for a month range and print the combined table
    /// (plus optional terminal charts).
    Forecast(ForecastArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying predict pipeline as `ecf forecast`, but
    /// renders results in a terminal UI using Ratatui.
    Tui,
}

/// Options for a one-shot forecast.
#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// Start year of the forecast range.
    #[arg(long)]
    pub start_year: i32,

    /// Start month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub start_month: u32,

    /// End year of the forecast range.
    #[arg(long)]
    pub end_year: i32,

    /// End month (1-12).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub end_month: u32,

    /// Render ASCII charts in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal charts.
    #[arg(long)]
    pub no_plot: bool,

    /// Skip fetching historical data (forecast-only charts).
    #[arg(long)]
    pub no_history: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

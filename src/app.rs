//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads historical data
//! - runs the predict pipeline
//! - prints the combined table/charts or hands off to the TUI

use clap::Parser;

use crate::cli::{Command, ForecastArgs};
use crate::config::AppConfig;
use crate::data::HistoricalData;
use crate::domain::{DateRange, Sector};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ecf` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `ecf` to behave like `ecf tui`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Tui => crate::tui::run(),
    }
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = AppConfig::from_env();
    let range = DateRange {
        start_year: args.start_year,
        start_month: args.start_month,
        end_year: args.end_year,
        end_month: args.end_month,
    };

    let history = if args.no_history {
        HistoricalData::default()
    } else {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::network(format!("failed to build HTTP client: {e}")))?;
        HistoricalData::load(&http, &config)
    };
    for err in &history.load_errors {
        // Load failure degrades the historical overlay only; the forecast
        // still runs.
        eprintln!("warning: failed to load historical data ({err})");
    }

    let run = pipeline::run_forecast(&config, &range)?;

    println!("{}", crate::report::format_run_header(&run.rows));
    println!("{}", crate::report::format_table(&run.rows));

    if args.plot && !args.no_plot {
        for sector in Sector::ALL {
            let overlay = history.sector(sector).map(|h| h.points.as_slice());
            let plot = crate::plot::render_sector_plot(
                sector.display_name(),
                overlay,
                &run.dates,
                &run.sector(sector).forecast,
                args.width,
                args.height,
            );
            println!("{plot}");
        }
    }

    Ok(())
}

/// Rewrite argv so `ecf` defaults to `ecf tui`.
///
/// Rules:
/// - `ecf`                     -> `ecf tui`
/// - `ecf --help/--version/-h` -> unchanged (show top-level help/version)
/// - anything else             -> unchanged (explicit subcommand required)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    if argv.len() == 1 {
        argv.push("tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_tui() {
        let argv = rewrite_args(vec!["ecf".to_string()]);
        assert_eq!(argv, vec!["ecf".to_string(), "tui".to_string()]);
    }

    #[test]
    fn explicit_subcommand_is_untouched() {
        let argv = rewrite_args(vec![
            "ecf".to_string(),
            "forecast".to_string(),
            "--start-year".to_string(),
            "2023".to_string(),
        ]);
        assert_eq!(argv[1], "forecast");
        assert_eq!(argv.len(), 4);
    }
}

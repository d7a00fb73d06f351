//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - historical observations: `o`
//! - forecast values: `*`

use chrono::{Datelike, NaiveDate};

use crate::domain::HistoryPoint;

/// Continuous month axis: whole months since year 0, fractional-free.
///
/// Both series are monthly, so an integer month index gives an evenly spaced
/// x-axis without day-level noise.
pub fn month_axis(date: NaiveDate) -> f64 {
    (date.year() as i64 * 12 + date.month0() as i64) as f64
}

/// Render one sector's chart: the full historical series with the forecast
/// appended on a shared month axis.
pub fn render_sector_plot(
    title: &str,
    history: Option<&[HistoryPoint]>,
    forecast_months: &[NaiveDate],
    forecast: &[f64],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let history_xy: Vec<(f64, f64)> = history
        .unwrap_or(&[])
        .iter()
        .map(|p| (month_axis(p.date), p.consumption))
        .collect();
    let forecast_xy: Vec<(f64, f64)> = forecast_months
        .iter()
        .zip(forecast.iter())
        .map(|(d, &y)| (month_axis(*d), y))
        .collect();

    let Some((x_min, x_max)) = x_range(&history_xy, &forecast_xy) else {
        return format!("{title}: no data to plot\n");
    };
    let (y_min, y_max) = y_range(&history_xy, &forecast_xy).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Forecast drawn last so it overlays where the series touch.
    for &(x, y) in &history_xy {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }
    for &(x, y) in &forecast_xy {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = '*';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{title} | x={} .. {} | y=[{y_min:.1}, {y_max:.1}]\n",
        month_label(x_min),
        month_label(x_max),
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(history: &[(f64, f64)], forecast: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(x, _) in history.iter().chain(forecast.iter()) {
        min = min.min(x);
        max = max.max(x);
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max <= min {
        max = min + 1.0;
    }
    Some((min, max))
}

fn y_range(history: &[(f64, f64)], forecast: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(_, y) in history.iter().chain(forecast.iter()) {
        min = min.min(y);
        max = max.max(y);
    }
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max <= min {
        max = min + 1.0;
    }
    Some((min, max))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let pad = ((max - min).abs() * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = (x - x_min) / (x_max - x_min);
    ((u * (width - 1) as f64).round() as isize).clamp(0, width as isize - 1) as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = (y - y_min) / (y_max - y_min);
    let row = ((1.0 - u) * (height - 1) as f64).round() as isize;
    row.clamp(0, height as isize - 1) as usize
}

/// "YYYY-MM" label for a month-axis value (shared with the TUI axis ticks).
pub fn month_label(axis: f64) -> String {
    let total = axis.round() as i64;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    format!("{year:04}-{month:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn month_axis_is_evenly_spaced() {
        let a = month_axis(date(2023, 3));
        let b = month_axis(date(2023, 4));
        let c = month_axis(date(2024, 3));
        assert_eq!(b - a, 1.0);
        assert_eq!(c - a, 12.0);
    }

    #[test]
    fn plot_contains_both_markers() {
        let history = vec![
            HistoryPoint {
                date: date(2022, 12),
                consumption: 100.0,
            },
            HistoryPoint {
                date: date(2023, 1),
                consumption: 110.0,
            },
        ];
        let months = vec![date(2023, 2), date(2023, 3)];
        let forecast = vec![120.0, 115.0];

        let plot = render_sector_plot("Industrial", Some(&history), &months, &forecast, 40, 10);
        assert!(plot.contains('o'));
        assert!(plot.contains('*'));
        assert!(plot.starts_with("Industrial | x=2022-12 .. 2023-03"));
        assert_eq!(plot.lines().count(), 11);
    }

    #[test]
    fn plot_without_history_still_renders_forecast() {
        let months = vec![date(2023, 2), date(2023, 3)];
        let forecast = vec![120.0, 115.0];
        let plot = render_sector_plot("Commercial", None, &months, &forecast, 40, 10);
        assert!(plot.contains('*'));
        assert!(!plot.contains('o'));
    }

    #[test]
    fn empty_series_yields_placeholder() {
        let plot = render_sector_plot("Industrial", None, &[], &[], 40, 10);
        assert_eq!(plot, "Industrial: no data to plot\n");
    }
}

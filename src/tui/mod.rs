//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for choosing the forecast month range
//! (start year/month, end year/month), a Predict action, two stacked
//! historical-vs-forecast charts, and the combined forecast table.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{self, RunOutput};
use crate::config::AppConfig;
use crate::data::HistoricalData;
use crate::domain::{month_name, DateRange, Sector};
use crate::error::AppError;
use crate::forecast::ForecastClient;
use crate::plot::{month_axis, month_label};

mod plotters_chart;

use plotters_chart::SectorChart;

/// Settings rows, top to bottom. The last row is the Predict trigger.
const FIELD_START_YEAR: usize = 0;
const FIELD_START_MONTH: usize = 1;
const FIELD_END_YEAR: usize = 2;
const FIELD_END_MONTH: usize = 3;
const FIELD_PREDICT: usize = 4;

/// Start the TUI.
pub fn run() -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new()?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: AppConfig,
    client: ForecastClient,
    http: reqwest::blocking::Client,
    history: HistoricalData,
    /// Selectable years, newest first (union of both sectors' data).
    years: Vec<i32>,
    start_year_idx: usize,
    start_month: u32,
    end_year_idx: usize,
    end_month: u32,
    selected_field: usize,
    status: String,
    /// Last successful predict; cleared on failure so no partial output stays
    /// on screen.
    run: Option<RunOutput>,
    /// Last failure, shown in place of the table.
    error: Option<String>,
}

impl App {
    fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env();
        let client = ForecastClient::new(&config)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::network(format!("failed to build HTTP client: {e}")))?;

        let history = HistoricalData::load(&http, &config);
        let years = history.years();

        let status = if history.load_errors.is_empty() {
            "Historical data loaded. Pick a range and press p to predict.".to_string()
        } else {
            format!(
                "Historical data unavailable ({}). Forecasting still works.",
                history.load_errors.join("; ")
            )
        };

        Ok(Self {
            config,
            client,
            http,
            history,
            years,
            start_year_idx: 0,
            start_month: 1,
            end_year_idx: 0,
            end_month: 12,
            selected_field: FIELD_START_YEAR,
            status,
            run: None,
            error: None,
        })
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_PREDICT {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == FIELD_PREDICT {
                    self.predict();
                }
            }
            KeyCode::Char('p') => self.predict(),
            KeyCode::Char('r') => self.reload_history(),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_field {
            FIELD_START_YEAR => {
                self.start_year_idx = step_index(self.start_year_idx, delta, self.years.len());
            }
            FIELD_START_MONTH => {
                self.start_month = step_month(self.start_month, delta);
            }
            FIELD_END_YEAR => {
                self.end_year_idx = step_index(self.end_year_idx, delta, self.years.len());
            }
            FIELD_END_MONTH => {
                self.end_month = step_month(self.end_month, delta);
            }
            _ => {}
        }
    }

    fn range(&self) -> DateRange {
        DateRange {
            start_year: self.years[self.start_year_idx.min(self.years.len() - 1)],
            start_month: self.start_month,
            end_year: self.years[self.end_year_idx.min(self.years.len() - 1)],
            end_month: self.end_month,
        }
    }

    fn predict(&mut self) {
        let range = self.range();
        self.status = format!("Requesting forecast for {}...", range.label());

        match pipeline::run_forecast_with_client(&self.client, &range) {
            Ok(run) => {
                self.status = format!("Rendered {} forecast months.", run.rows.len());
                self.error = None;
                self.run = Some(run);
            }
            Err(err) => {
                // No partial rendering: a failed predict clears the previous
                // results and shows the error instead.
                self.run = None;
                self.error = Some(err.to_string());
                self.status = err.to_string();
            }
        }
    }

    fn reload_history(&mut self) {
        self.history = HistoricalData::load(&self.http, &self.config);
        self.years = self.history.years();
        self.start_year_idx = self.start_year_idx.min(self.years.len() - 1);
        self.end_year_idx = self.end_year_idx.min(self.years.len() - 1);
        self.status = if self.history.load_errors.is_empty() {
            "Historical data reloaded.".to_string()
        } else {
            format!(
                "Historical data unavailable ({}).",
                self.history.load_errors.join("; ")
            )
        };
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(7),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_settings(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("ecf", Style::default().fg(Color::Cyan)),
            Span::raw(" — electricity consumption forecast"),
        ]));

        let mut parts = Vec::new();
        for sector in Sector::ALL {
            let label = match self.history.sector(sector) {
                Some(h) => format!(
                    "{}: {} months",
                    sector.display_name().to_lowercase(),
                    h.points.len()
                ),
                None => format!("{}: unavailable", sector.display_name().to_lowercase()),
            };
            parts.push(label);
        }
        parts.push(format!("range: {}", self.range().label()));

        lines.push(Line::from(Span::styled(
            parts.join(" | "),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(area);

        let charts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        self.draw_chart(frame, charts[0], Sector::Industrial);
        self.draw_chart(frame, charts[1], Sector::Commercial);
        self.draw_table(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, sector: Sector) {
        let block = Block::default()
            .title(format!(
                "{} Sector Electricity Consumption",
                sector.display_name()
            ))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((history, forecast, x_bounds, y_bounds)) = self.chart_series(sector) else {
            let msg = Paragraph::new("No data yet. Press p to predict.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let widget = SectorChart {
            history: &history,
            forecast: &forecast,
            x_bounds,
            y_bounds,
            x_label: "month",
            y_label: "consumption",
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };
        frame.render_widget(widget, inner);
    }

    /// Build the chart series for one sector: historical overlay plus the
    /// latest forecast, on the shared month axis. None when there is nothing
    /// to draw at all.
    #[allow(clippy::type_complexity)]
    fn chart_series(
        &self,
        sector: Sector,
    ) -> Option<(Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2])> {
        let history: Vec<(f64, f64)> = self
            .history
            .sector(sector)
            .map(|h| {
                h.points
                    .iter()
                    .map(|p| (month_axis(p.date), p.consumption))
                    .collect()
            })
            .unwrap_or_default();

        let forecast: Vec<(f64, f64)> = self
            .run
            .as_ref()
            .map(|run| {
                run.dates
                    .iter()
                    .zip(run.sector(sector).forecast.iter())
                    .map(|(d, &y)| (month_axis(*d), y))
                    .collect()
            })
            .unwrap_or_default();

        if history.is_empty() && forecast.is_empty() {
            return None;
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(x, y) in history.iter().chain(forecast.iter()) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if x_max <= x_min {
            x_max = x_min + 1.0;
        }
        if y_max <= y_min {
            y_max = y_min + 1.0;
        }
        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

        Some((
            history,
            forecast,
            [x_min, x_max],
            [y_min - pad, y_max + pad],
        ))
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Forecasted Energy Consumption")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(error) = &self.error {
            let p = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(ratatui::widgets::Wrap { trim: true });
            frame.render_widget(p, inner);
            return;
        }

        let Some(run) = &self.run else {
            let p = Paragraph::new("Pick a range and press p to predict.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(p, inner);
            return;
        };

        let p = Paragraph::new(crate::report::format_table(&run.rows));
        frame.render_widget(p, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let range = self.range();
        let items = vec![
            ListItem::new(format!("Start Year:  {}", range.start_year)),
            ListItem::new(format!("Start Month: {}", month_name(range.start_month))),
            ListItem::new(format!("End Year:    {}", range.end_year)),
            ListItem::new(format!("End Month:   {}", month_name(range.end_month))),
            ListItem::new("Predict"),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter/p predict  r reload history  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Step a list index, clamped to the list bounds.
fn step_index(idx: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = idx as i64 + delta as i64;
    next.clamp(0, len as i64 - 1) as usize
}

/// Step a 1-based month, wrapping around the year.
fn step_month(month: u32, delta: i32) -> u32 {
    let zero_based = (month as i32 - 1 + delta).rem_euclid(12);
    zero_based as u32 + 1
}

fn fmt_axis_x(v: f64) -> String {
    month_label(v)
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_stepping_wraps() {
        assert_eq!(step_month(1, -1), 12);
        assert_eq!(step_month(12, 1), 1);
        assert_eq!(step_month(6, 1), 7);
        assert_eq!(step_month(6, -1), 5);
    }

    #[test]
    fn index_stepping_clamps() {
        assert_eq!(step_index(0, -1, 5), 0);
        assert_eq!(step_index(4, 1, 5), 4);
        assert_eq!(step_index(2, 1, 5), 3);
        assert_eq!(step_index(0, 1, 0), 0);
    }
}

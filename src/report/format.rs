//! Formatted terminal output for the combined forecast table.
//!
//! We keep formatting code in one place so:
//! - the pipeline code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::ForecastRow;

/// Format the combined table: one row per forecast month with both sectors'
/// point forecast and 95% interval.
pub fn format_table(rows: &[ForecastRow]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<16} {:>14} {:<22} {:>14} {:<22}\n",
            "Date", "Industrial", "Industrial 95% PI", "Commercial", "Commercial 95% PI"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<16} {:-<14} {:-<22} {:-<14} {:-<22}\n",
            "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for row in rows {
        out.push_str(
            format!(
                "{:<16} {:>14.2} {:<22} {:>14.2} {:<22}\n",
                row.label(),
                row.industrial,
                row.industrial_interval.to_string(),
                row.commercial,
                row.commercial_interval.to_string(),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Summary line printed above the table in CLI mode.
pub fn format_run_header(rows: &[ForecastRow]) -> String {
    let span = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => format!("{} – {}", first.label(), last.label()),
        _ => "-".to_string(),
    };
    format!(
        "=== ecf - Electricity Consumption Forecast ===\nMonths: {} | Range: {span}\n",
        rows.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Interval;
    use chrono::NaiveDate;

    fn row(y: i32, m: u32, ind: f64, com: f64) -> ForecastRow {
        ForecastRow {
            month: NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            industrial: ind,
            industrial_interval: Interval {
                lower: ind - 5.0,
                upper: ind + 5.0,
            },
            commercial: com,
            commercial_interval: Interval {
                lower: com - 5.0,
                upper: com + 5.0,
            },
        }
    }

    #[test]
    fn table_has_header_rule_and_one_line_per_row() {
        let rows = vec![row(2023, 3, 2900.0, 1400.0), row(2023, 4, 2910.0, 1410.0)];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("March 2023"));
        assert!(lines[2].contains("2900.00"));
        assert!(lines[2].contains("[2895.00, 2905.00]"));
        assert!(lines[3].contains("April 2023"));
    }

    #[test]
    fn run_header_names_the_span() {
        let rows = vec![row(2023, 3, 1.0, 2.0), row(2023, 5, 1.0, 2.0)];
        let header = format_run_header(&rows);
        assert!(header.contains("Months: 2"));
        assert!(header.contains("March 2023 – May 2023"));
    }
}

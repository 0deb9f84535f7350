//! Text formatting for the report and the terminal.
//!
//! The report ledger format is relied on by consumers of the PDF:
//!
//! ```text
//! 2024-01-01 - 5.0°C
//! 2024-01-02 - 6.0°C (Change: +1.00°C)
//! ```

use crate::domain::{Covariates, DateRange, ReportContent, VariationRecord};
use crate::report::SeriesStats;

pub const REPORT_TITLE: &str = "Temperature Prediction Report";
pub const LEDGER_HEADING: &str = "Predicted Temperatures & Variation:";

/// Build the ordered text content of a report.
pub fn report_content(range: &DateRange, covariates: Covariates, variations: &[VariationRecord]) -> ReportContent {
    ReportContent {
        title: REPORT_TITLE.to_string(),
        parameter_lines: parameter_lines(range, covariates),
        ledger_heading: LEDGER_HEADING.to_string(),
        ledger_lines: variations.iter().map(format_ledger_line).collect(),
    }
}

/// The parameter summary: date range, then the covariates.
pub fn parameter_lines(range: &DateRange, covariates: Covariates) -> Vec<String> {
    vec![
        format!("Date Range: {} to {}", range.start(), range.end()),
        format!(
            "Humidity: {}%, Wind Speed: {} km/h",
            covariates.humidity, covariates.wind_speed
        ),
    ]
}

/// `"<date> - <temperature>°C"`, plus `" (Change: <±change>°C)"` when the
/// record has a predecessor.
pub fn format_ledger_line(record: &VariationRecord) -> String {
    let mut line = format!("{} - {}°C", record.date, fmt_temperature(record.temperature));
    if let Some(change) = record.change {
        line.push_str(&format!(" (Change: {}°C)", fmt_change(change)));
    }
    line
}

/// Temperatures print with at least one decimal: `5.0`, `4.5`, `23.47`.
pub fn fmt_temperature(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Signed, 2 decimals. Zero (including `-0.0`) prints as `+0.00`.
pub fn fmt_change(value: f64) -> String {
    if value == 0.0 {
        return "+0.00".to_string();
    }
    format!("{value:+.2}")
}

/// Format the run header printed before the table.
pub fn format_run_summary(range: &DateRange, covariates: Covariates, stats: Option<&SeriesStats>) -> String {
    let mut out = String::new();

    out.push_str("=== tempcast - Temperature Prediction ===\n");
    for line in parameter_lines(range, covariates) {
        out.push_str(&line);
        out.push('\n');
    }
    if let Some(s) = stats {
        out.push_str(&format!(
            "Days: n={} | predicted=[{:.2}, {:.2}]°C | mean={:.2}°C\n",
            s.n_days, s.min, s.max, s.mean
        ));
    }

    out
}

/// Format the prediction table (one row per day).
pub fn format_table(rows: &[VariationRecord]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<10} {:>28} {:>25}",
            "Date", "Predicted Temperature (°C)", "Temperature Change (°C)"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(format!("{:-<10} {:-<28} {:-<25}", "", "", "").trim_end());
    out.push('\n');

    for r in rows {
        let change = r.change.map(fmt_change).unwrap_or_default();
        out.push_str(
            format!(
                "{:<10} {:>28} {:>25}",
                r.date.to_string(),
                fmt_temperature(r.temperature),
                change
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, temperature: f64, change: Option<f64>) -> VariationRecord {
        VariationRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            temperature,
            change,
        }
    }

    #[test]
    fn ledger_lines_match_contract() {
        assert_eq!(format_ledger_line(&record(1, 5.0, None)), "2024-01-01 - 5.0°C");
        assert_eq!(
            format_ledger_line(&record(2, 6.0, Some(1.0))),
            "2024-01-02 - 6.0°C (Change: +1.00°C)"
        );
        assert_eq!(
            format_ledger_line(&record(3, 4.5, Some(-1.5))),
            "2024-01-03 - 4.5°C (Change: -1.50°C)"
        );
    }

    #[test]
    fn change_sign_is_always_explicit() {
        assert_eq!(fmt_change(0.0), "+0.00");
        assert_eq!(fmt_change(-0.0), "+0.00");
        assert_eq!(fmt_change(0.25), "+0.25");
        assert_eq!(fmt_change(-12.3), "-12.30");
    }

    #[test]
    fn temperature_formatting() {
        assert_eq!(fmt_temperature(5.0), "5.0");
        assert_eq!(fmt_temperature(23.47), "23.47");
        assert_eq!(fmt_temperature(-3.5), "-3.5");
    }

    #[test]
    fn parameter_lines_use_plain_numbers() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let range = DateRange::new(start, end).unwrap();
        let lines = parameter_lines(
            &range,
            Covariates {
                humidity: 60.0,
                wind_speed: 12.5,
            },
        );
        assert_eq!(lines[0], "Date Range: 2024-01-01 to 2024-01-03");
        assert_eq!(lines[1], "Humidity: 60%, Wind Speed: 12.5 km/h");
    }

    #[test]
    fn content_has_one_ledger_line_per_variation() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let range = DateRange::new(start, end).unwrap();
        let rows = vec![record(1, 5.0, None), record(2, 6.0, Some(1.0)), record(3, 4.5, Some(-1.5))];
        let content = report_content(
            &range,
            Covariates {
                humidity: 60.0,
                wind_speed: 10.0,
            },
            &rows,
        );

        assert_eq!(content.title, REPORT_TITLE);
        assert_eq!(content.ledger_heading, LEDGER_HEADING);
        assert_eq!(content.ledger_lines.len(), 3);
        assert!(!content.ledger_lines[0].contains("Change:"));
        assert!(content.ledger_lines[1..].iter().all(|l| l.contains("Change:")));
    }

    #[test]
    fn table_has_header_rule_and_rows() {
        let rows = vec![record(1, 5.0, None), record(2, 6.0, Some(1.0))];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[1].starts_with("----------"));
        assert!(lines[2].starts_with("2024-01-01"));
        assert!(lines[2].ends_with("5.0"));
        assert!(lines[3].ends_with("+1.00"));
    }
}
